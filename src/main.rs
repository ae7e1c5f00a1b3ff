use crossterm::event::{self, Event as CEvent, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::error::Error;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokemon_details::cli::fetch_only;
use pokemon_details::query::{EXAMPLE_NAME, POKEMON_DETAILS_QUERY};
use pokemon_details::ui::{draw_ui, App, ViewLoader, ViewState};
use pokemon_details::server::shutdown_on;
use pokemon_details::{build_router, name_variables, AppConfig, AppState, GraphqlClient};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

async fn serve(config: &AppConfig, client: GraphqlClient) -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, upstream = %client.endpoint(), "listening");
    axum::serve(listener, build_router(AppState::new(client)))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env();
    let client = GraphqlClient::new(config.graphql_endpoint.clone());

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--serve") {
        init_tracing(config.log_json);
        return serve(&config, client).await;
    }

    // Print the endpoint's JSON for one name and exit.
    if let Some(pos) = args.iter().position(|a| a == "--fetch-only") {
        init_tracing(config.log_json);
        let name = args.get(pos + 1).map(String::as_str).unwrap_or(EXAMPLE_NAME);
        let code = fetch_only(&client, name, &mut io::stdout(), &mut io::stderr()).await?;
        if code != 0 {
            std::process::exit(code);
        }
        return Ok(());
    }

    // Logs would tear the alternate screen, so only install them on request.
    if std::env::var_os("RUST_LOG").is_some() {
        init_tracing(config.log_json);
    }

    // Loader result lands here for the draw loop to pick up
    let loaded: Arc<Mutex<Option<ViewState>>> = Arc::new(Mutex::new(None));
    let loaded_clone = loaded.clone();
    tokio::spawn(async move {
        let mut loader = ViewLoader::new();
        let vars = name_variables(EXAMPLE_NAME);
        if let Some(state) = loader.load(&client, POKEMON_DETAILS_QUERY, &vars).await {
            if let Ok(mut slot) = loaded_clone.lock() {
                *slot = Some(state);
            }
        }
    });

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    let result: Result<(), Box<dyn Error>> = loop {
        if let Err(e) = draw_ui(&mut terminal, &app) {
            break Err(e.into());
        }

        let update = loaded.lock().ok().and_then(|mut slot| slot.take());
        if let Some(state) = update {
            app.apply(state);
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));
        match event::poll(timeout) {
            Ok(true) => {
                if let Ok(CEvent::Key(key)) = event::read() {
                    match key.code {
                        KeyCode::Char('q') => break Ok(()),
                        KeyCode::F(1) | KeyCode::Char('h') => app.show_help = !app.show_help,
                        KeyCode::Down => app.next(),
                        KeyCode::Up => app.previous(),
                        _ => {}
                    }
                }
            }
            Ok(false) => {}
            Err(e) => break Err(e.into()),
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(LeaveAlternateScreen)?;
    result
}
