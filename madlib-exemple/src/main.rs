use std::collections::HashMap;

use log::info;
use madlib_core::madlib::capitalize::{capitalize_sentence_grid, capitalize_sentences};
use madlib_core::madlib::filler::{FillOptions, fill_in_madlib};
use madlib_core::madlib::generator::Generator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load the word lists ("data/words/*.txt") and the templates ("data/templates/*.txt")
    // The word lists are cached in "data/words.bin" after the first run
    let mut app: Generator = Generator::new("./data")?;
    info!("templates: {:?}", app.template_names());

    // By default a category that runs out of unused words makes the fill spin forever,
    // bound it to fail instead
    app.options = FillOptions { max_redraws: Some(100) };

    // Generate 10 comments from random templates
    for i in 0..10 {
        println!("Generated comment {}: {}", i + 1, app.generate()?.trim_end());
    }

    // Fill a given template
    println!("madlib1: {}", app.fill("madlib1")?.trim_end());

    // Fill a template file, the result is written to "data/templates/madlib2_filled.txt"
    let output = app.process_file("./data/templates/madlib2.txt")?;
    println!("Written: {}", output.display());

    // Ad-hoc dictionary
    let dictionary = HashMap::from([("NAME".to_owned(), vec!["Ted", "Ned", "Zed", "Red"])]);
    println!("{}", fill_in_madlib("hello my name is [NAME]", &dictionary)?);

    // Unknown category
    match fill_in_madlib("hello my name is [AAAAA]", &dictionary) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Expected failure: {e}"),
    }

    // Capitalization
    println!("{}", capitalize_sentences("...hello. how are you?"));
    let grid = vec![vec!["hello.", "how", "are"], vec!["you", "today?"], vec!["good!"]];
    println!("{:?}", capitalize_sentence_grid(&grid));

    Ok(())
}
