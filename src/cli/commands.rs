//! CLI command definitions and handlers

use clap::Subcommand;
use std::time::Instant;
use tracing::info;

use crate::core::config::TranslatorConfig;
use crate::core::translator::Translator;

/// Commands for Microsoft Translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a single text
    Translate {
        /// Text to translate
        text: String,

        /// Source language (default: en)
        #[arg(short, long, default_value = "en")]
        from: String,

        /// Target language (default: ja)
        #[arg(short, long, default_value = "ja")]
        to: String,
    },

    /// Translate several texts in one request
    Batch {
        /// Texts to translate, in order
        #[arg(required = true)]
        texts: Vec<String>,

        /// Source language (default: en)
        #[arg(short, long, default_value = "en")]
        from: String,

        /// Target language (default: ja)
        #[arg(short, long, default_value = "ja")]
        to: String,

        /// Print the detected source language of each record
        #[arg(long)]
        detailed: bool,
    },
}

/// Handle single translation command
pub async fn handle_translate(
    config: TranslatorConfig,
    text: String,
    from: String,
    to: String,
) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let translator = Translator::new(config)?;

    info!("Translating {} -> {}", from, to);
    let translation = translator.translate(&text, &from, &to).await?;
    info!("Completed in {:?}", start_time.elapsed());

    println!("{}", translation);

    Ok(())
}

/// Handle batch translation command
pub async fn handle_batch(
    config: TranslatorConfig,
    texts: Vec<String>,
    from: String,
    to: String,
    detailed: bool,
) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let translator = Translator::new(config)?;

    info!("Translating {} texts {} -> {}", texts.len(), from, to);
    let results = translator.translate_batch_detailed(&texts, &from, &to).await?;
    info!("Completed in {:?}", start_time.elapsed());

    for (i, result) in results.iter().enumerate() {
        if detailed {
            println!("{}. [{}] {}", i + 1, result.source_lang, result.translation);
        } else {
            println!("{}", result.translation);
        }
    }

    Ok(())
}
