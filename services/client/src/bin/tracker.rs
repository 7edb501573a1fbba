//! services/client/src/bin/tracker.rs
//!
//! Command-line front end over `TrackerClient`: restores the session, runs one
//! intent and prints what a UI would render.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracker_client::{
    config::Config,
    error::ClientError,
    store::{Route, Signup, TrackerClient},
};
use tracker_core::{
    dashboard_preview, ComplaintFilter, ComplaintStatus, EngineerFilter, EngineerStatus, Role,
};

#[derive(Parser)]
#[command(name = "tracker", about = "Campus complaint tracker client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the restored session.
    Status,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        role: Role,
    },
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        role: Role,
        /// Roll number (students).
        #[arg(long)]
        roll: Option<String>,
        /// Specialization (engineers).
        #[arg(long)]
        specialization: Option<String>,
    },
    Logout,
    /// List engineers, optionally filtered.
    Engineers {
        /// Available, Busy (any case) or another status exactly as the server sends it.
        #[arg(long)]
        status: Option<EngineerStatus>,
        #[arg(long)]
        specialization: Option<String>,
    },
    /// List complaints, optionally filtered by status.
    Complaints {
        #[arg(long)]
        status: Option<ComplaintStatus>,
    },
    /// Sync the signed-in role's dashboard and show its overview.
    Dashboard,
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    let cli = Cli::parse();

    // --- 2. Build the Client & Restore the Session ---
    let client = TrackerClient::from_config(&config)?;
    client.session().check_auth().await;
    info!("Startup route: {:?}", client.route());

    // --- 3. Run the Requested Intent ---
    match cli.command {
        Command::Status => {}
        Command::Login {
            email,
            password,
            role,
        } => client.session().login(&email, &password, role).await,
        Command::Signup {
            name,
            email,
            password,
            role,
            roll,
            specialization,
        } => {
            let form = Signup {
                name,
                email,
                password,
                role,
                roll,
                specialization,
            };
            client.session().signup(form).await;
        }
        Command::Logout => client.logout().await,
        Command::Engineers {
            status,
            specialization,
        } => {
            client.sync().fetch_engineers().await;
            let filter = EngineerFilter {
                status,
                specialization,
            };
            let engineers = client.sync().engineers();
            for engineer in filter.apply(&engineers) {
                println!(
                    "#{:<4} {:<20} {:<14} {:<10} {}",
                    engineer.id(),
                    engineer.name,
                    engineer.specialization,
                    engineer.status,
                    engineer.email
                );
            }
        }
        Command::Complaints { status } => {
            client.sync().fetch_complaints().await;
            let complaints = client.sync().complaints();
            let filter = ComplaintFilter { status };
            for complaint in filter.apply(&complaints) {
                let raised = complaint
                    .created_at_time()
                    .map(|t| t.format("%d %b %Y").to_string())
                    .unwrap_or_else(|| complaint.created_at.clone());
                println!(
                    "#{:<4} {:<14} {:<12} {:?}  {}  {}/{}",
                    complaint.id(),
                    complaint.subject,
                    complaint.status,
                    complaint.priority,
                    raised,
                    complaint.hostel_no,
                    complaint.room_no
                );
            }
        }
        Command::Dashboard => {
            client.sync_dashboard().await;
            if client.route() == Route::AdminDashboard {
                let engineers = client.sync().engineers();
                let complaints = client.sync().complaints();
                let preview = dashboard_preview(&engineers, &complaints);
                println!("Engineers: {} total", engineers.len());
                for engineer in preview.engineers {
                    println!("  {} ({})", engineer.name, engineer.status);
                }
                println!("Complaints: {} total", complaints.len());
                for complaint in preview.complaints {
                    println!("  {} [{}]", complaint.subject, complaint.status);
                }
            }
        }
    }

    // --- 4. Report What the UI Would Show ---
    let session = client.session().snapshot();
    println!("Route: {:?}", session.route());
    if let Some(user) = session.user() {
        println!("Signed in as {} <{}> ({})", user.name, user.email, user.role);
    }
    let toast = client.toaster().current();
    if toast.visible {
        println!("Toast: {}", toast.message);
    }

    Ok(())
}
