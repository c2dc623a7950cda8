//! Command-line view over the provider console stores.
//!
//! ```text
//! provider-console [--config <path>] org
//! provider-console services
//! provider-console agents
//! provider-console agent <id>
//! provider-console bookings [pending|in-progress|completed|cancelled]
//! provider-console booking <id>
//! provider-console assign <booking-id> <agent-id>
//! provider-console delete-agent <id>
//! provider-console delete-service <id>
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use provider_console::models::{Agent, Booking, BookingStatus};
use provider_console::{Console, ConsoleConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
enum Command {
    Org,
    Services,
    Agents,
    Agent(String),
    Bookings(Option<BookingStatus>),
    Booking(String),
    Assign { booking: String, agent: String },
    DeleteAgent(String),
    DeleteService(String),
}

fn parse_args(args: &[String]) -> anyhow::Result<(Option<PathBuf>, Command)> {
    let mut config = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config needs a path")?;
            config = Some(PathBuf::from(path));
        } else {
            rest.push(arg.as_str());
        }
    }

    let command = match rest.as_slice() {
        ["org"] => Command::Org,
        ["services"] => Command::Services,
        ["agents"] => Command::Agents,
        ["agent", id] => Command::Agent(id.to_string()),
        ["bookings"] => Command::Bookings(None),
        ["bookings", status] => {
            let status = status.parse::<BookingStatus>().map_err(anyhow::Error::msg)?;
            Command::Bookings(Some(status))
        }
        ["booking", id] => Command::Booking(id.to_string()),
        ["assign", booking, agent] => Command::Assign {
            booking: booking.to_string(),
            agent: agent.to_string(),
        },
        ["delete-agent", id] => Command::DeleteAgent(id.to_string()),
        ["delete-service", id] => Command::DeleteService(id.to_string()),
        other => bail!("unknown command: {}", other.join(" ")),
    };

    Ok((config, command))
}

fn print_agent(index: usize, agent: &Agent) {
    println!("{}. {} ({})", index + 1, agent.name, agent.status);
    println!("   Email: {}", agent.email);
    if !agent.services.is_empty() {
        println!("   Services: {}", agent.services.join(", "));
    }
    println!("   Area: {}", agent.service_area);
    println!("   ID: {}", agent.id);
    println!();
}

fn print_booking(index: usize, booking: &Booking) {
    println!(
        "{}. {} for {} ({})",
        index + 1,
        booking.service.name,
        booking.client.name,
        booking.status
    );
    println!("   When: {} {}", booking.booking_date, booking.booking_time);
    println!("   Payment: {}", booking.payment_status);
    if let Some(agent) = &booking.agent {
        println!("   Agent: {}", agent.name);
    }
    println!("   ID: {}", booking.id);
    println!();
}

async fn run(console: &Console, command: Command) {
    match command {
        Command::Org => {
            if console.organization.load().await {
                if let Some(org) = console.organization.profile() {
                    println!("{} ({})", org.name, org.address);
                    println!("   Phone: {}", org.phone);
                    println!("   Website: {}", org.website);
                    println!(
                        "   Services: {}, agents: {}, rating: {:.1} ({} reviews)",
                        org.service_count, org.agent_count, org.rating, org.review_count
                    );
                    for (day, hours) in &org.business_hours {
                        println!("   {:?}: {}", day, hours);
                    }
                }
            } else {
                println!("No organization registered yet");
            }
        }
        Command::Services => {
            console.services.list().await;
            for (i, service) in console.services.snapshot().iter().enumerate() {
                println!("{}. {} ({:.2})", i + 1, service.name, service.base_price);
                println!("   Category: {}", service.category);
                println!("   Tags: {}", service.tags.join(", "));
                println!("   ID: {}", service.id);
                println!();
            }
        }
        Command::Agents => {
            console.agents.list().await;
            for (i, agent) in console.agents.snapshot().iter().enumerate() {
                print_agent(i, agent);
            }
        }
        Command::Agent(id) => {
            console.agents.get_one(&id).await;
            if let Some(agent) = console.agents.current() {
                print_agent(0, &agent);
            }
        }
        Command::Bookings(status) => {
            console.bookings.list().await;
            for (i, booking) in console.bookings.by_status(status).iter().enumerate() {
                print_booking(i, booking);
            }
        }
        Command::Booking(id) => {
            console.bookings.get_one(&id).await;
            if let Some(booking) = console.bookings.current() {
                print_booking(0, &booking);
            }
        }
        Command::Assign { booking, agent } => {
            console.assignments.assign(&booking, &agent).await;
        }
        Command::DeleteAgent(id) => console.agents.remove(&id).await,
        Command::DeleteService(id) => console.services.remove(&id).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, command) = parse_args(&args)?;

    let config = ConsoleConfig::resolve(config_path.as_deref())
        .context("Failed to load console configuration")?;
    info!("Backend: {}", config.shopkeeper_base_url);

    let console = Console::connect(&config)?;
    run(&console, command).await;

    Ok(())
}
