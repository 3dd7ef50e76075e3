use tokio::io::{AsyncBufReadExt, BufReader};

use emble_app::{
    build_dashboard,
    command::{self, Command},
    config::Config,
    logging::init_logging,
    render,
};
use emble_dashboard::{Dashboard, SendOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config.logging);

    tracing::info!(base_url = %config.api.base_url, "Starting Emble dashboard");

    let dashboard = build_dashboard(&config)?;
    dashboard.init().await;

    print_dashboard(&dashboard);
    for entry in dashboard.chat.snapshot().transcript.iter() {
        println!("{}\n", render::chat_entry(entry));
    }

    spawn_thinking_indicator(&dashboard);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", command::HELP),
            Command::Show => print_dashboard(&dashboard),
            Command::RefreshKpi => {
                dashboard.kpi.load().await;
                println!("{}", render::kpi_strip(&dashboard.kpi.snapshot()));
            }
            Command::Group(group) => {
                dashboard.series.set_group(group).await;
                print!("{}", render::series_table(&dashboard.series.snapshot()));
            }
            Command::Window(window) => {
                dashboard.series.set_window(window).await;
                print!("{}", render::series_table(&dashboard.series.snapshot()));
            }
            Command::Chat(text) => match dashboard.chat.send_message(&text).await {
                SendOutcome::Replied | SendOutcome::Failed => {
                    if let Some(reply) = dashboard.chat.snapshot().transcript.last() {
                        println!("{}\n", render::chat_entry(reply));
                    }
                }
                SendOutcome::Busy => println!("Still waiting for the previous answer"),
                SendOutcome::Ignored => {}
            },
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("{}\n", render::kpi_strip(&dashboard.kpi.snapshot()));
    println!("{}", render::series_table(&dashboard.series.snapshot()));
}

/// Print a marker whenever the chat starts waiting on the backend.
fn spawn_thinking_indicator(dashboard: &Dashboard) {
    let mut chat = dashboard.chat.subscribe();
    tokio::spawn(async move {
        let mut was_thinking = chat.borrow().thinking;
        while chat.changed().await.is_ok() {
            let thinking = chat.borrow_and_update().thinking;
            if thinking && !was_thinking {
                println!("analyst is thinking...");
            }
            was_thinking = thinking;
        }
    });
}
