mod settings;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, post, put, web};
use log::{error, info, warn};
use serde::Deserialize;
use serde_json::Value;

use madlib_core::error::{FaultKind, MadlibError};
use madlib_core::madlib::capitalize::{capitalize_sentence_grid, capitalize_sentences};
use madlib_core::madlib::dictionary::WordDictionary;
use madlib_core::madlib::filler::{FillOptions, fill_in_madlib_json};
use madlib_core::madlib::generator::Generator;

use settings::Settings;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	template: Option<String>,
}

/// Body of the `/v1/fill` endpoint.
///
/// Both fields are raw JSON so shape errors are reported as type faults
/// instead of deserialization failures.
#[derive(Deserialize)]
struct FillRequest {
	#[serde(default)]
	madlib: Value,
	#[serde(default)]
	dictionary: Value,
	max_redraws: Option<usize>,
}

struct SharedData {
	generator: Generator,
	data_dir: PathBuf,
	max_redraws: usize,
}

/// Maps a madlib error to an HTTP response.
fn error_response(err: MadlibError) -> HttpResponse {
	let mut response = match (&err, err.kind()) {
		(MadlibError::UnknownTemplate(_), _) => HttpResponse::NotFound(),
		(_, FaultKind::Type) => HttpResponse::BadRequest(),
		(_, FaultKind::Lookup) | (_, FaultKind::Syntax) => HttpResponse::UnprocessableEntity(),
		(_, FaultKind::Liveness) => HttpResponse::Conflict(),
		(_, FaultKind::Storage) => {
			error!("{err}");
			HttpResponse::InternalServerError()
		}
	};
	response.body(err.to_string())
}

/// Loads the generator of `data_dir` with the configured redraw bound.
fn load_generator(data_dir: &Path, max_redraws: usize) -> Result<Generator, MadlibError> {
	let mut generator = Generator::new(data_dir)?;
	generator.options = FillOptions { max_redraws: Some(max_redraws) };
	Ok(generator)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Fills the template named by `?template=`, or a random one.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let result = match &query.template {
		Some(name) => shared_data.generator.fill(name),
		None => shared_data.generator.generate(),
	};

	match result {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => error_response(e),
	}
}

#[get("/v1/templates")]
async fn get_templates(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	match data.lock() {
		Ok(shared_data) => HttpResponse::Ok().body(shared_data.generator.template_names().join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Generator lock failed"),
	}
}

#[get("/v1/categories")]
async fn get_categories(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	match data.lock() {
		Ok(shared_data) => {
			let categories: Vec<&str> = shared_data.generator.dictionary().categories().collect();
			HttpResponse::Ok().body(categories.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Generator lock failed"),
	}
}

/// HTTP POST endpoint `/v1/fill`
///
/// Fills an ad-hoc madlib with an ad-hoc dictionary. The redraw bound of the
/// request can only be lower than the configured one.
#[post("/v1/fill")]
async fn post_fill(data: web::Data<Mutex<SharedData>>, body: web::Json<FillRequest>) -> impl Responder {
	let limit = match data.lock() {
		Ok(shared_data) => shared_data.max_redraws,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let max_redraws = body.max_redraws.map_or(limit, |requested| requested.min(limit));

	match fill_in_madlib_json(&body.madlib, &body.dictionary, &FillOptions { max_redraws: Some(max_redraws) }) {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => error_response(e),
	}
}

#[post("/v1/capitalize")]
async fn post_capitalize(body: String) -> impl Responder {
	HttpResponse::Ok().body(capitalize_sentences(&body))
}

#[post("/v1/capitalize_grid")]
async fn post_capitalize_grid(body: web::Json<Vec<Vec<String>>>) -> impl Responder {
	HttpResponse::Ok().json(capitalize_sentence_grid(&body.into_inner()))
}

/// HTTP PUT endpoint `/v1/reload`
///
/// Re-reads the word lists (refreshing the binary cache) and the templates.
#[put("/v1/reload")]
async fn put_reload(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	// The files are read without holding the lock
	let (data_dir, max_redraws) = match data.lock() {
		Ok(shared_data) => (shared_data.data_dir.clone(), shared_data.max_redraws),
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let reloaded = WordDictionary::rebuild(data_dir.join("words"))
		.and_then(|_| load_generator(&data_dir, max_redraws));

	match (reloaded, data.lock()) {
		(Ok(generator), Ok(mut shared_data)) => {
			shared_data.generator = generator;
			HttpResponse::Ok().body("Data reloaded successfully")
		}
		(Err(e), _) => error_response(e),
		(_, Err(_)) => HttpResponse::InternalServerError().body("Generator lock failed"),
	}
}

/// Main entry point for the server.
///
/// Loads the generator from the configured data folder, wraps it in a `Mutex`
/// and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let settings = Settings::load().map_err(std::io::Error::other)?;
	let data_dir = PathBuf::from(&settings.data_dir);

	let generator = match load_generator(&data_dir, settings.max_redraws) {
		Ok(generator) => generator,
		Err(e) => {
			warn!("starting without data, {}: {e}", data_dir.display());
			let mut generator = Generator::default();
			generator.options = FillOptions { max_redraws: Some(settings.max_redraws) };
			generator
		}
	};

	let shared_data = SharedData { generator, data_dir, max_redraws: settings.max_redraws };
	let shared_data = web::Data::new(Mutex::new(shared_data));
	let permissive_cors = settings.permissive_cors;

	info!("listening on {}:{}", settings.host, settings.port);
	HttpServer::new(move || {
		let cors = if permissive_cors { Cors::permissive() } else { Cors::default() };
		App::new()
			.wrap(Logger::default())
			.wrap(cors)
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_templates)
			.service(get_categories)
			.service(post_fill)
			.service(post_capitalize)
			.service(post_capitalize_grid)
			.service(put_reload)
	})
		.bind((settings.host.as_str(), settings.port))?
		.run()
		.await
}
