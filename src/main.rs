use std::error::Error;
use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use store_doctor::adapters::ai::{GeminiConfig, GeminiProvider, OpenAIConfig, OpenAIProvider};
use store_doctor::adapters::console::{ConsoleDriver, ConsoleReply};
use store_doctor::adapters::reference::HttpReferenceSource;
use store_doctor::application::consultation::{ConsultationEngine, GenerationPipeline};
use store_doctor::application::reference_cache::ReferenceDocumentCache;
use store_doctor::config::{AiConfig, AiProvider, AppConfig, ValidationError};
use store_doctor::domain::knowledge::{builtin, KnowledgeBase};
use store_doctor::domain::prompt::PromptAssembler;
use store_doctor::ports::AIProvider as Backend;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    // Logs go to stderr so they never interleave with the transcript.
    tracing_subscriber::fmt()
        .with_env_filter(config.logging.env_filter())
        .with_writer(std::io::stderr)
        .init();

    let knowledge = match config.knowledge.path() {
        Some(path) => {
            info!(path = %path.display(), "loading knowledge base");
            KnowledgeBase::load(path).await?
        }
        None => builtin().clone(),
    };
    info!(
        version = knowledge.version(),
        scenarios = knowledge.scenarios().len(),
        "knowledge base ready"
    );

    let provider = build_provider(&config.ai)?;
    let info = provider.provider_info();
    info!(provider = %info.name, model = %info.model, "generative backend ready");

    let source = HttpReferenceSource::new(config.reference.fetch_timeout())?;
    let references = ReferenceDocumentCache::new(Arc::new(source), config.reference.ttl());

    let pipeline = GenerationPipeline::new(provider, Arc::new(references), Arc::new(knowledge))
        .with_assembler(PromptAssembler::new(config.consultation.assembler_config()))
        .with_options(config.consultation.generation_options());
    let mut driver = ConsoleDriver::new(ConsultationEngine::new(pipeline));

    println!("{}\n", driver.banner());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match driver.run_line(&line).await {
            Ok(ConsoleReply::Text(text)) => println!("{text}\n"),
            Ok(ConsoleReply::Silent) => {}
            Ok(ConsoleReply::Quit) => break,
            Err(err) => println!("error: {}\n", err.user_message()),
        }
    }

    info!("session ended");
    Ok(())
}

fn build_provider(config: &AiConfig) -> Result<Arc<dyn Backend>, Box<dyn Error>> {
    let provider: Arc<dyn Backend> = match config.primary_provider {
        AiProvider::Gemini => {
            let key = config
                .gemini_api_key
                .as_deref()
                .ok_or(ValidationError::MissingRequired("GEMINI_API_KEY"))?;
            let mut gemini = GeminiConfig::new(key).with_timeout(config.timeout());
            if let Some(model) = config.model_override() {
                gemini = gemini.with_model(model);
            }
            Arc::new(GeminiProvider::new(gemini)?)
        }
        AiProvider::OpenAI => {
            let key = config
                .openai_api_key
                .as_deref()
                .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;
            let mut openai = OpenAIConfig::new(key).with_timeout(config.timeout());
            if let Some(model) = config.model_override() {
                openai = openai.with_model(model);
            }
            Arc::new(OpenAIProvider::new(openai)?)
        }
    };
    Ok(provider)
}
