use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a whole text file into a `String`.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads a word list: one candidate per line.
///
/// - Surrounding whitespace is trimmed
/// - Blank lines and lines starting with `#` are skipped
pub(crate) fn read_word_list<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	Ok(read_file(filename)?
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty() && !line.starts_with('#'))
		.map(str::to_owned)
		.collect())
}

/// Builds a sibling path of `input_path` with a stem suffix and a new extension.
///
/// Examples:
/// - `data/templates/vote.txt` + `"_filled"` + `"txt"` → `data/templates/vote_filled.txt`
/// - `data/words` + `""` + `"bin"` → `data/words.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	stem_suffix: &str,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	// The stem may itself contain dots (`vote.v2`), so no `set_extension`
	let mut file_name = file_stem.to_os_string();
	file_name.push(stem_suffix);
	file_name.push(".");
	file_name.push(output_extension);

	Ok(parent.join(file_name))
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/words/NAME.txt"` → `"NAME"`
/// - `"vote.txt"` → `"vote"`
pub(crate) fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists the files of `dir` with the given extension, sorted by path.
///
/// Subdirectories are ignored.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_with_suffix() {
		let path = build_output_path("data/templates/vote.txt", "_filled", "txt").unwrap();
		assert_eq!(path, PathBuf::from("data/templates/vote_filled.txt"));
	}

	#[test]
	fn output_path_keeps_dotted_stem() {
		let path = build_output_path("t/vote.v2.txt", "_filled", "txt").unwrap();
		assert_eq!(path, PathBuf::from("t/vote.v2_filled.txt"));
	}

	#[test]
	fn output_path_for_folder_cache() {
		assert_eq!(build_output_path("data/words", "", "bin").unwrap(), PathBuf::from("data/words.bin"));
		assert_eq!(build_output_path("data/words/", "", "bin").unwrap(), PathBuf::from("data/words.bin"));
	}

	#[test]
	fn filename_without_extension() {
		assert_eq!(get_filename("./data/words/NAME.txt").unwrap(), "NAME");
	}

	#[test]
	fn word_list_skips_comments_and_blanks() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("NAME.txt");
		fs::write(&path, "# names\nTed\n\n  Ned  \r\n#Zed\nRed").unwrap();
		assert_eq!(read_word_list(&path).unwrap(), vec!["Ted", "Ned", "Red"]);
	}

	#[test]
	fn list_files_filters_by_extension() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("b.txt"), "").unwrap();
		fs::write(dir.path().join("a.txt"), "").unwrap();
		fs::write(dir.path().join("c.bin"), "").unwrap();
		fs::create_dir(dir.path().join("d.txt")).unwrap();

		let files = list_files(dir.path(), "txt").unwrap();
		let names: Vec<String> = files.iter().map(|p| get_filename(p).unwrap()).collect();
		assert_eq!(names, vec!["a", "b"]);
	}
}
