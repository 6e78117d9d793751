// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Druckkasse: pay-per-page print kiosk
//
// Entry point. Initialises logging and services, then drives one intake
// session for the document given on the command line.

mod services;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use druckkasse_core::error::{DruckkasseError, Result};
use druckkasse_core::types::{WorkflowStage, WorkflowView};
use druckkasse_document::FileDescriptor;
use tokio::sync::watch;
use tracing::info;

use services::app_services::AppServices;

/// Pay-per-page print kiosk: estimate, quote, pay, print.
#[derive(Parser, Debug)]
#[command(name = "druckkasse", author, version, about, long_about = None)]
struct Args {
    /// Document to print (PDF, JPEG, PNG, GIF, DOC or DOCX)
    #[arg(required_unless_present = "write_config")]
    file: Option<PathBuf>,

    /// Declared MIME type; guessed from the file extension when omitted
    #[arg(long = "type", value_name = "MIME")]
    media_type: Option<String>,

    /// Confirm payment and print
    #[arg(long, conflicts_with = "cancel")]
    pay: bool,

    /// Request a quote, then cancel the payment
    #[arg(long)]
    cancel: bool,

    /// Open a preview of the document once it is ready
    #[arg(long)]
    preview: bool,

    /// Path to configuration file (default: <data dir>/config.json)
    #[arg(short = 'c', long, env = "DRUCKKASSE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the effective configuration to the config file
    #[arg(long)]
    write_config: bool,

    /// Print workflow views as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Druckkasse starting");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", state::render_error(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let services = AppServices::init(args.config.clone());

    if args.write_config {
        services.save_config()?;
        println!("configuration written to {}", services.config_path().display());
    }
    let Some(path) = args.file else {
        return Ok(());
    };

    let workflow = services.workflow();
    let mut views = workflow.subscribe();
    let printer = tokio::spawn(print_views(workflow.subscribe(), args.json));

    let descriptor = FileDescriptor::from_path(&path, args.media_type.as_deref()).await?;
    workflow.submit_file(descriptor).await?;

    if args.preview || services.config().auto_preview {
        workflow.preview()?;
    }

    if let Some(quote) = workflow.request_print() {
        info!(%quote, "quote issued");
    }

    if args.cancel {
        workflow.cancel_payment();
    } else if args.pay {
        workflow.confirm_payment();
        let settled = wait_for(&mut views, |v| v.stage != WorkflowStage::Processing).await?;
        match settled.stage {
            WorkflowStage::AwaitingPayment => {
                return Err(DruckkasseError::SettlementDeclined(
                    settled.last_error.unwrap_or_default(),
                ));
            }
            WorkflowStage::PaidConfirmation => {
                wait_for(&mut views, |v| v.stage == WorkflowStage::Ready).await?;
            }
            _ => {}
        }
        info!(spool = %services.spool_dir().display(), "print job handed off");
    } else {
        info!("payment pending; run again with --pay to print");
    }

    workflow.clear_selection();
    drop(workflow);
    drop(views);
    // The printer exits once the last workflow handle is gone.
    let _ = tokio::time::timeout(Duration::from_secs(1), printer).await;
    Ok(())
}

async fn print_views(mut views: watch::Receiver<WorkflowView>, json: bool) {
    while views.changed().await.is_ok() {
        let view = views.borrow_and_update().clone();
        if json {
            match serde_json::to_string(&view) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "could not serialise view"),
            }
        } else {
            for line in state::render_view(&view) {
                println!("{line}");
            }
        }
    }
}

async fn wait_for(
    views: &mut watch::Receiver<WorkflowView>,
    done: impl FnMut(&WorkflowView) -> bool,
) -> Result<WorkflowView> {
    views
        .wait_for(done)
        .await
        .map(|view| view.clone())
        .map_err(|_| DruckkasseError::Bridge("workflow stopped before finishing".into()))
}
