//! CLI utility to request a single suitability prediction.

use matsel::config;
use matsel::egui_app::view_model;
use matsel::material::{FormInputs, MaterialField};
use matsel::predictor::{HealthStatus, PredictorClient};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = matsel::logging::init_stderr() {
        eprintln!("Logging disabled: {err}");
    }

    let config = config::load_with_api_base(options.api_base.as_deref())
        .map_err(|err| err.to_string())?;
    let client = PredictorClient::new(&config.api);

    if options.health {
        return match client.check_health().map_err(|err| err.user_message())? {
            HealthStatus::Ok => {
                println!("{}: ok", client.base_url());
                Ok(())
            }
            HealthStatus::Degraded(reason) => {
                Err(format!("{}: degraded ({reason})", client.base_url()))
            }
        };
    }

    let mut inputs = FormInputs::default();
    for (field, value) in &options.values {
        inputs.set_field(*field, value.as_str());
    }
    let properties = inputs.to_properties().map_err(|err| err.to_string())?;
    let result = client
        .predict(&properties)
        .map_err(|err| err.user_message())?;

    if options.json {
        let text = serde_json::to_string(&result)
            .map_err(|err| format!("Failed to encode result: {err}"))?;
        println!("{text}");
    } else {
        let view = view_model::result_view(&result);
        println!("Prediction:  {}", view.verdict);
        println!("Probability: {}", view.probability);
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    api_base: Option<String>,
    values: Vec<(MaterialField, String)>,
    json: bool,
    health: bool,
}

fn parse_args(args: Vec<String>) -> Result<Option<Options>, String> {
    let mut options = Options::default();
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--api-base" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--api-base requires a value".to_string())?;
                options.api_base = Some(value.to_string());
            }
            "--json" => {
                options.json = true;
            }
            "--health" => {
                options.health = true;
            }
            flag => {
                let field = flag
                    .strip_prefix("--")
                    .and_then(MaterialField::from_key)
                    .ok_or_else(|| format!("Unknown argument: {flag}\n\n{}", help_text()))?;
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| format!("{flag} requires a value"))?;
                options.values.push((field, value.to_string()));
            }
        }
        idx += 1;
    }
    Ok(Some(options))
}

fn help_text() -> String {
    [
        "matsel-predict",
        "",
        "Asks the prediction service whether a material is suitable for selection.",
        "Unspecified properties use the form defaults.",
        "",
        "Usage:",
        "  matsel-predict [--Su <v>] [--Sy <v>] [--E <v>] [--G <v>] [--mu <v>] [--Ro <v>]",
        "  matsel-predict --health",
        "",
        "Options:",
        "  --api-base <url>   Service base URL (overrides MATSEL_API_BASE and config.toml).",
        "  --json             Print the parsed verdict as JSON (usable, probability, prediction).",
        "  --health           Only check GET /health.",
    ]
    .join("\n")
}
