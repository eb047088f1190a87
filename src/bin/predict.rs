use anyhow::{Context, Result};
use clap::Parser;
use sentiment_api::config::DEFAULT_MODEL_PATH;
use sentiment_api::core::engine::DEFAULT_POSITIVE_CLASS_INDEX;
use sentiment_api::utils::logger;
use sentiment_api::utils::validation::validate_input;
use sentiment_api::{load_engine, CliConfig, PredictResponse};

#[derive(Parser)]
#[command(name = "predict")]
#[command(about = "Run the sentiment model once and print the API response")]
struct Args {
    /// Text to analyze
    text: String,

    /// Directory holding the exported model artifacts
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    model_path: String,

    #[arg(long, default_value_t = DEFAULT_POSITIVE_CLASS_INDEX)]
    positive_class_index: usize,

    /// Also print the probability of every class
    #[arg(long)]
    probabilities: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let config = CliConfig {
        model_path: Some(args.model_path.clone()),
        positive_class_index: Some(args.positive_class_index),
        ..Default::default()
    };

    let payload = serde_json::json!({ "text": args.text });
    let text = validate_input(Some(&payload), usize::MAX)?;

    let engine = load_engine(&config)
        .await
        .with_context(|| format!("failed to load model from '{}'", args.model_path))?;
    let prediction = engine.run(&text)?;

    if args.probabilities {
        tracing::info!("Class probabilities: {:?}", prediction.probabilities);
        eprintln!("probabilities: {:?}", prediction.probabilities);
    }

    let response = PredictResponse::from(prediction);
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
