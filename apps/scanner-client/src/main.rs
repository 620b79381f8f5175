use scan_pipeline::camera::sim::SimulatedBackend;
use scan_pipeline::camera::{CameraSession, DecodeOptions, Frame};
use scan_pipeline::config::load_config;
use scan_pipeline::orchestrator::{ScanOrchestrator, ScanState};
use scan_pipeline::scoring::HttpScoreService;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod display;
mod prompts;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer())
        .init();

    info!("Starting scanner client...");
    let config = load_config();
    let service = HttpScoreService::new(reqwest::Client::new(), config.api_base_url.clone());
    let mut orchestrator = ScanOrchestrator::new(service);

    println!("Personalized food scanner.");
    println!("Sample barcodes: 3017624010701 (Nutella), 5449000000996 (Coke).");

    if prompts::ask_yes_no("\nSet up a health profile first? [y/N] ")? {
        orchestrator.set_profile(prompts::run_wizard()?);
        println!("Profile saved for this session.");
    } else {
        println!("Scanning with the default profile (age 30, nothing selected).");
    }

    loop {
        let input = prompts::read_line("\nEnter a barcode, or 'scan', 'profile', 'quit': ")?;
        match input.as_str() {
            "quit" | "q" => break,
            "profile" => {
                // full restart: drop the old profile before re-entering the wizard
                orchestrator.clear_profile();
                orchestrator.reset();
                orchestrator.set_profile(prompts::run_wizard()?);
                println!("Profile updated.");
            }
            "scan" => {
                if let Some(barcode) = scan_with_camera().await {
                    submit_and_render(&mut orchestrator, &barcode).await;
                }
            }
            // empty input is ignored at the boundary, never an error
            "" => {}
            barcode => submit_and_render(&mut orchestrator, barcode).await,
        }
    }

    info!("Scanner client exiting.");
    Ok(())
}

/// Run one camera session against the simulated decode backend: the typed
/// barcode stands in for the frame a real camera would decode. Every exit
/// path closes the session.
async fn scan_with_camera() -> Option<String> {
    let backend = SimulatedBackend::single_device("sim-0", "Simulated back camera");
    let mut session = CameraSession::new(backend.clone(), DecodeOptions::default());

    if let Err(err) = session.enumerate_devices().await {
        println!("{err}");
        session.close();
        return None;
    }
    if let Err(err) = session.start_default().await {
        println!("{err}");
        session.close();
        return None;
    }

    let input = match prompts::read_line("Camera running. Type the barcode it should detect: ") {
        Ok(input) => input,
        Err(_) => {
            session.close();
            return None;
        }
    };
    if input.is_empty() {
        println!("Scan cancelled.");
        session.close();
        return None;
    }

    backend.push_frame(Frame::NoCode);
    backend.push_frame(Frame::Code(input));

    match session.wait_for_detection().await {
        Ok(barcode) => {
            println!("Detected: {barcode}");
            session.close();
            Some(barcode)
        }
        Err(err) => {
            println!("{err}");
            session.close();
            None
        }
    }
}

async fn submit_and_render(
    orchestrator: &mut ScanOrchestrator<HttpScoreService>,
    barcode: &str,
) {
    println!("Analyzing...");
    match orchestrator.submit(barcode).await {
        ScanState::Succeeded(result) => display::render_result(result),
        ScanState::Failed(message) => println!("Error: {message}"),
        _ => {}
    }
    // back to scanning; the profile survives the reset
    orchestrator.reset();
}
