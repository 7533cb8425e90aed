#![allow(dead_code)]
mod aligner;
mod config;
mod error;
mod g2p;
mod language;
mod model;
mod phoneme;
mod pipeline;
mod routes;
mod sanitizer;
mod scoring;
#[cfg(test)]
mod testing;

use crate::aligner::MfaClient;
use crate::config::{Cli, Config};
use crate::g2p::{EspeakG2p, G2pEngines, OpenJtalk, PinyinG2p};
use crate::language::Language;
use crate::pipeline::Assessor;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tower_http::{cors::CorsLayer, trace};
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt().init();

    let config = Config::from_cli(args)?;

    info!(
        "Loading Open JTalk dictionary from {}",
        config.open_jtalk_dict().display()
    );
    let open_jtalk = OpenJtalk::new_with_initialize(config.open_jtalk_dict()).unwrap_or_else(|e| {
        warn!("Japanese G2P is unavailable, Japanese references will be empty: {}", e);
        OpenJtalk::new_without_dic()
    });

    let engines = G2pEngines::new(
        Arc::new(EspeakG2p::new(config.espeak_command().clone())),
        Arc::new(PinyinG2p),
        Arc::new(open_jtalk),
    );
    let aligner = MfaClient::new(config.aligner_url().clone(), *config.aligner_timeout())?;
    let assessor = Arc::new(Assessor::new(engines, Arc::new(aligner)));

    let app = routes::router(assessor)
        .layer(
            trace::TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive());

    info!("Languages:");
    for language in Language::iter() {
        let (dictionary, acoustic_model) = language.aligner_models();
        info!(
            "  {} ({}, {} / {})",
            language.display_name(),
            language,
            dictionary,
            acoustic_model
        );
    }
    info!("Aligner: {}", config.aligner_url());

    info!("Starting server...");

    info!("Listening on {}", config.addr());

    axum::Server::bind(config.addr())
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for CTRL+C: {}", e);
            }
        })
        .await?;

    info!("Shutting down...");

    Ok(())
}
