use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use petfinder_core::dashboard::{ActionOutcome, DashboardController, NotificationLevel};
use petfinder_core::domain::{NewPet, Pet, PetChanges};
use petfinder_core::repositories::PetRepository;
use petfinder_core::storage::ObjectStore;
use petfinder_core::Session;
use petfinder_infrastructure::Backends;
use petfinder_shared::config::AppConfig;
use petfinder_shared::telemetry::init_cli_telemetry;
use tracing::debug;
use uuid::Uuid;

type Dashboard = DashboardController<dyn PetRepository, dyn ObjectStore>;

#[derive(Parser, Debug)]
#[command(
    name = "petfinder",
    version,
    about = "PetFinder - manage your pets and their QR tags"
)]
struct Args {
    /// Owner (user) id the dashboard acts for
    #[arg(long, env = "PETFINDER_OWNER")]
    owner: Uuid,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the owner's pets, newest first
    List,

    /// Register a new pet
    Add(PetFields),

    /// Change some fields of a pet
    Update {
        pet_id: Uuid,

        #[command(flatten)]
        fields: PetChangeFields,
    },

    /// Generate and publish the pet's QR code
    Qr { pet_id: Uuid },

    /// Remove a pet and its QR code
    Delete { pet_id: Uuid },
}

#[derive(ClapArgs, Debug)]
struct PetFields {
    #[arg(long)]
    name: String,

    #[arg(long)]
    species: String,

    #[arg(long)]
    breed: String,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    microchip_id: Option<String>,
}

#[derive(ClapArgs, Debug)]
struct PetChangeFields {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    species: Option<String>,

    #[arg(long)]
    breed: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    microchip_id: Option<String>,
}

impl From<PetFields> for NewPet {
    fn from(fields: PetFields) -> Self {
        NewPet {
            name: fields.name,
            species: fields.species,
            breed: fields.breed,
            description: fields.description,
            microchip_id: fields.microchip_id,
        }
    }
}

impl From<PetChangeFields> for PetChanges {
    fn from(fields: PetChangeFields) -> Self {
        PetChanges {
            name: fields.name,
            species: fields.species,
            breed: fields.breed,
            description: fields.description,
            microchip_id: fields.microchip_id,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_cli_telemetry();

    let args = Args::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    let backends = Backends::connect(&config).await?;
    let (pets, qr) = backends.services(config.scan_base_url());
    let dashboard: Dashboard = DashboardController::new(Session::new(args.owner), pets, qr);

    if let ActionOutcome::Failed(e) = dashboard.load().await {
        print_notifications(&dashboard);
        return Err(e).context("Could not load the dashboard");
    }

    let outcome = match args.command {
        Command::List => ActionOutcome::Completed,
        Command::Add(fields) => dashboard.add_pet(fields.into()).await,
        Command::Update { pet_id, fields } => dashboard.update_pet(pet_id, fields.into()).await,
        Command::Qr { pet_id } => dashboard.generate_qr(pet_id).await,
        Command::Delete { pet_id } => dashboard.delete_pet(pet_id).await,
    };
    debug!("Command finished: {:?}", outcome);

    print_notifications(&dashboard);
    print_pets(&dashboard.pets());

    if matches!(outcome, ActionOutcome::Failed(_)) {
        std::process::exit(1);
    }
    Ok(())
}

fn print_notifications(dashboard: &Dashboard) {
    for note in dashboard.take_notifications() {
        match note.level {
            NotificationLevel::Success => println!("✔ {}", note.message),
            NotificationLevel::Error => eprintln!("✖ {}", note.message),
        }
    }
}

fn print_pets(pets: &[Pet]) {
    if pets.is_empty() {
        println!("No pets registered yet.");
        return;
    }

    println!();
    for pet in pets {
        println!("{}  {} ({}, {})", pet.id, pet.name, pet.species, pet.breed);
        if let Some(description) = &pet.description {
            println!("    {}", description);
        }
        if let Some(chip) = &pet.microchip_id {
            println!("    microchip: {}", chip);
        }
        match &pet.qr_code_url {
            Some(url) => println!("    qr: {}", url),
            None => println!("    qr: not generated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_partial_fields() {
        let owner = Uuid::new_v4();
        let pet = Uuid::new_v4();
        let args = Args::try_parse_from([
            "petfinder",
            "--owner",
            &owner.to_string(),
            "update",
            &pet.to_string(),
            "--breed",
            "Beagle",
        ])
        .unwrap();

        assert_eq!(args.owner, owner);
        match args.command {
            Command::Update { pet_id, fields } => {
                assert_eq!(pet_id, pet);
                let changes: PetChanges = fields.into();
                assert_eq!(changes.breed.as_deref(), Some("Beagle"));
                assert!(changes.name.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
