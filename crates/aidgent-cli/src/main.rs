use aidgent_application::{
    SendOutcome, SessionIndexService, SessionMetaReconciler, TurnController, texts,
};
use aidgent_client::{ClientConfig, HttpTriageClient, TriageApi};
use aidgent_core::intent::Intent;
use aidgent_core::session::{MessageRole, SessionIndexRepository};
use aidgent_infrastructure::JsonSessionIndexRepository;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "aidgent")]
#[command(about = "Aidgent - symptom-triage chat client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new triage session and open the chat
    New {
        /// Initial triage category (urti or derm)
        #[arg(long)]
        intent: Option<Intent>,
    },
    /// List locally known sessions (reconciled against the server)
    List,
    /// Chat in an existing session
    Chat { id: String },
    /// Show the SOAP summary for a session
    Summary { id: String },
    /// Remove a session from this device (server-held state is kept)
    Remove { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let api: Arc<dyn TriageApi> = Arc::new(HttpTriageClient::new(ClientConfig::try_from_env()?));
    let index: Arc<dyn SessionIndexRepository> =
        Arc::new(JsonSessionIndexRepository::default_location()?);

    match cli.command {
        Commands::New { intent } => {
            let service = SessionIndexService::new(api.clone(), index.clone());
            let meta = service.start_session(intent).await?;
            println!("เริ่มแชทใหม่: {}", meta.id);
            chat_loop(meta.id, api, index).await?;
        }
        Commands::List => {
            let reconciler = SessionMetaReconciler::new(api.clone(), index.clone());
            reconciler.reconcile_all().await;

            let service = SessionIndexService::new(api, index);
            let sessions = service.sessions().await;
            if sessions.is_empty() {
                println!("ยังไม่มีแชท เริ่มแชทใหม่ได้เลย");
                return Ok(());
            }
            for meta in sessions {
                let intent = meta
                    .intent
                    .map(|intent| format!(" · อาการ: {}", intent.label_th()))
                    .unwrap_or_default();
                println!(
                    "{}  เริ่มเมื่อ: {}  สถานะ: {}{}",
                    meta.id, meta.created_at, meta.last_status, intent
                );
            }
        }
        Commands::Chat { id } => {
            chat_loop(id, api, index).await?;
        }
        Commands::Summary { id } => match api.fetch_transcript(&id).await {
            Ok(transcript) => match transcript.latest_soap() {
                Some(soap) => {
                    println!("S — Subjective\n{}\n", soap.subjective);
                    println!("O — Objective\n{}\n", soap.objective);
                    println!("A — Assessment\n{}\n", soap.assessment);
                    println!("P — Plan\n{}", soap.plan);
                }
                None => println!("{}", texts::SOAP_NOT_READY_TH),
            },
            Err(err) => {
                tracing::warn!("Failed to load summary for {id}: {err}");
                println!("{}", texts::SOAP_LOAD_FAILED_TH);
            }
        },
        Commands::Remove { id } => {
            let service = SessionIndexService::new(api, index);
            service.delete_session(&id).await?;
            println!("ลบแชท {id} ออกจากอุปกรณ์นี้แล้ว");
        }
    }

    Ok(())
}

/// Interactive chat over stdin. An empty line or "exit" ends the loop; a
/// latched red flag blocks further input for the rest of the run.
async fn chat_loop(
    session_id: String,
    api: Arc<dyn TriageApi>,
    index: Arc<dyn SessionIndexRepository>,
) -> Result<()> {
    let controller = TurnController::new(session_id, api, index);
    controller.load().await;

    for message in controller.messages().await {
        print_message(message.role, &message.content_th);
    }

    let stdin = std::io::stdin();
    loop {
        if let Some(banner) = controller.red_flag_label().await {
            println!("\n!! {banner}");
            println!("โปรดติดต่อ 1669 หรือไปโรงพยาบาลที่ใกล้ที่สุด");
            break;
        }

        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() || text == "exit" {
            break;
        }

        let before = controller.messages().await.len();
        match controller.send_turn(text).await {
            SendOutcome::Sent | SendOutcome::Failed => {
                for message in &controller.messages().await[before + 1..] {
                    print_message(message.role, &message.content_th);
                }
            }
            // Stdin is sequential; sends never overlap here.
            SendOutcome::Busy | SendOutcome::Blocked => {}
        }
    }

    Ok(())
}

fn print_message(role: MessageRole, content: &str) {
    match role {
        MessageRole::User => println!("คุณ: {content}"),
        MessageRole::Assistant => println!("ผู้ช่วย: {content}"),
    }
}
