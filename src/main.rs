use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hms_core::config::{
    base_url_from_env_value, fallback_policy_from_env_value, timeout_from_env_value,
    token_file_from_env_value,
};
use hms_core::domain::Credentials;
use hms_core::hooks::{
    AdmissionsHook, DashboardHook, DepartmentsHook, PatientsHook, QueryState, StaffHook,
    TreatmentsHook, UsersHook, WardsHook,
};
use hms_core::services::address::{format_address_for_display, parse_address_json};
use hms_core::services::nrc::{nrc_names, parse_nrc};
use hms_core::{AppServices, ClientConfig, FileTokenStore, MemoryTokenStore, TokenStore};
use hms_types::DateRange;

#[derive(Parser)]
#[command(name = "hms")]
#[command(about = "Hospital management system client")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        email: String,
        /// Password (falls back to HMS_PASSWORD)
        #[arg(long, env = "HMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List or search patients
    Patients {
        #[arg(long)]
        search: Option<String>,
    },
    /// List doctors
    Doctors {
        /// Only doctors taking patients
        #[arg(long)]
        available: bool,
    },
    /// List appointments
    Appointments,
    /// List admissions, one page at a time
    Admissions {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Only this patient's admissions
        #[arg(long)]
        patient: Option<u64>,
    },
    /// List treatments of an admission
    Treatments { patient_id: u64, admission_id: u64 },
    /// List doctors and nurses
    Staff,
    /// List user accounts
    Users {
        /// Show soft-deleted accounts instead
        #[arg(long)]
        deleted: bool,
    },
    /// List wards and their rooms
    Wards,
    /// List departments
    Departments,
    /// Show dashboard statistics (default: last 30 days)
    Dashboard {
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
    /// Parse an NRC number
    Nrc { value: String },
    /// Format a stored address
    Address { value: String },
}

/// Startup configuration, read from the environment after `.env` is loaded.
fn client_config() -> anyhow::Result<ClientConfig> {
    Ok(ClientConfig::new(
        base_url_from_env_value(std::env::var("HMS_API_URL").ok())?,
        timeout_from_env_value(std::env::var("HMS_TIMEOUT_SECS").ok())?,
        token_file_from_env_value(std::env::var("HMS_TOKEN_FILE").ok()),
        fallback_policy_from_env_value(std::env::var("HMS_SAMPLE_FALLBACK").ok())?,
    ))
}

fn token_store(cfg: &ClientConfig) -> anyhow::Result<Arc<dyn TokenStore>> {
    Ok(match cfg.token_file() {
        Some(path) => Arc::new(
            FileTokenStore::open(path)
                .with_context(|| format!("opening token file {}", path.display()))?,
        ),
        None => Arc::new(MemoryTokenStore::new()),
    })
}

/// The loaded data, or the error the last load ended with.
fn settled<T>(state: QueryState<T>) -> anyhow::Result<T> {
    if let Some(err) = state.error {
        return Err(err.into());
    }
    state.data.ok_or_else(|| anyhow!("no data loaded"))
}

fn emit<T: Serialize>(json: bool, value: &T, lines: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        lines(value);
    }
    Ok(())
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hms_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    // Codec commands need no backend.
    match &cli.command {
        Commands::Nrc { value } => {
            let Some(nrc) = parse_nrc(value) else {
                bail!("{value} is not a valid NRC number");
            };
            let known = nrc
                .code
                .parse::<u8>()
                .is_ok_and(|code| nrc_names(code).iter().any(|name| *name == nrc.name_en));
            return emit(json, &nrc, |n| {
                println!("Code:        {}", n.code);
                println!("Township:    {}{}", n.name_en, if known { "" } else { " (unlisted)" });
                println!("Citizenship: {}", n.citizenship);
                println!("Number:      {}", n.number);
            });
        }
        Commands::Address { value } => {
            let parsed = parse_address_json(value);
            return emit(json, &parsed, |_| {
                println!("{}", format_address_for_display(Some(value)));
            });
        }
        _ => {}
    }

    let cfg = client_config()?;
    tracing::debug!(base_url = %cfg.base_url(), fallback = ?cfg.fallback(), "configuration loaded");
    let services = AppServices::wire(&cfg, token_store(&cfg)?)?;

    match cli.command {
        Commands::Login { email, password } => {
            let user = services
                .auth
                .login(&Credentials { email, password })
                .await?;
            emit(json, &user, |u| {
                println!("Logged in as {} <{}> ({})", u.name, u.email, u.role_label)
            })?;
        }
        Commands::Logout => {
            services.auth.logout().await?;
            println!("Logged out.");
        }
        Commands::Whoami => {
            if !services.auth.is_authenticated() {
                bail!("not logged in");
            }
            let user = services.auth.current_user().await?;
            emit(json, &user, |u| {
                println!("{} <{}> ({})", u.name, u.email, u.role_label)
            })?;
        }
        Commands::Patients { search } => {
            let hook = PatientsHook::new(services.patients.clone());
            match search {
                Some(query) => hook.search(&query).await,
                None => hook.refresh().await,
            };
            let patients = settled(hook.state())?;
            emit(json, &patients, |rows| {
                if rows.is_empty() {
                    println!("No patients found.");
                }
                for p in rows {
                    println!(
                        "{:>5}  {:<24} {:<11} {:<14} {}",
                        p.id,
                        p.name,
                        p.status_label,
                        or_dash(p.department.as_deref()),
                        p.address
                    );
                }
            })?;
        }
        Commands::Doctors { available } => {
            let doctors = if available {
                services.doctors.list_available().await?
            } else {
                services.doctors.list().await?
            };
            emit(json, &doctors, |rows| {
                for d in rows {
                    let status = if d.available { "available" } else { "unavailable" };
                    println!("{:>5}  {:<24} {:<24} {}", d.id, d.name, d.specialization, status);
                }
            })?;
        }
        Commands::Appointments => {
            let appointments = services.appointments.list().await?;
            emit(json, &appointments, |rows| {
                for a in rows {
                    println!(
                        "{:>5}  {}  {:<24} {:<24} {:?}",
                        a.id,
                        a.scheduled_at.format("%Y-%m-%d %H:%M"),
                        a.patient_name,
                        a.doctor_name,
                        a.status
                    );
                }
            })?;
        }
        Commands::Admissions {
            patient: Some(patient_id),
            ..
        } => {
            let admissions = services.admissions.list_for_patient(patient_id).await?;
            emit(json, &admissions, |rows| {
                for a in rows {
                    println!("{:>5}  {:<12} {}", a.id, a.admission_number, a.status_label);
                }
            })?;
        }
        Commands::Admissions { page, patient: None } => {
            let hook = AdmissionsHook::new(services.admissions.clone());
            hook.load_page(page).await;
            let admissions = settled(hook.state())?;
            emit(json, &admissions, |p| {
                for a in &p.data {
                    println!(
                        "{:>5}  {:<12} {:<24} {:<11} {}/{}",
                        a.id,
                        a.admission_number,
                        or_dash(a.patient_name.as_deref()),
                        a.status_label,
                        or_dash(a.ward.as_deref()),
                        or_dash(a.bed_number.as_deref())
                    );
                }
                println!("Page {} of {} ({} total)", p.current_page, p.last_page, p.total);
            })?;
        }
        Commands::Treatments {
            patient_id,
            admission_id,
        } => {
            let hook = TreatmentsHook::new(services.treatments.clone(), patient_id, admission_id);
            hook.refresh().await;
            let treatments = settled(hook.state())?;
            emit(json, &treatments, |rows| {
                for t in rows {
                    println!(
                        "{:>5}  {:<16} {:<24} {:?}",
                        t.id, t.type_label, t.name, t.outcome
                    );
                }
            })?;
        }
        Commands::Staff => {
            let hook = StaffHook::new(services.staff.clone());
            hook.refresh().await;
            let directory = settled(hook.state())?;
            emit(json, &directory, |d| {
                println!("Doctors:");
                for s in &d.doctors {
                    println!("{:>5}  {:<24} {}", s.id, s.name, s.email);
                }
                println!("Nurses:");
                for s in &d.nurses {
                    println!("{:>5}  {:<24} {}", s.id, s.name, s.email);
                }
            })?;
        }
        Commands::Users { deleted } => {
            let hook = UsersHook::new(services.users.clone());
            hook.show_deleted(deleted).await;
            let users = settled(hook.state())?;
            emit(json, &users, |rows| {
                for u in rows {
                    println!("{:>5}  {:<24} {:<28} {}", u.id, u.name, u.email, u.role_label);
                }
            })?;
        }
        Commands::Wards => {
            let hook = WardsHook::new(services.wards.clone());
            hook.refresh().await;
            let catalog = settled(hook.state())?;
            emit(json, &catalog, |_| {
                for ward in hook.ward_options() {
                    let rooms: Vec<String> = hook
                        .room_options(&ward.value)
                        .into_iter()
                        .map(|room| room.label)
                        .collect();
                    println!("{:<8} {:<24} {}", ward.value, ward.label, rooms.join(", "));
                }
            })?;
        }
        Commands::Departments => {
            let hook = DepartmentsHook::new(services.departments.clone());
            hook.refresh().await;
            let departments = settled(hook.state())?;
            emit(json, &departments, |rows| {
                for d in rows {
                    println!("{:>5}  {:<24} {}", d.id, d.name, or_dash(d.description.as_deref()));
                }
            })?;
        }
        Commands::Dashboard { from, to } => {
            let range = match (from, to) {
                (Some(from), Some(to)) => Some(DateRange::new(from, to)?),
                _ => None,
            };
            let hook = DashboardHook::new(services.reports.clone());
            hook.set_range(range).await;
            let report = settled(hook.state())?;
            emit(json, &report, |r| {
                println!(
                    "{} to {}",
                    r.range.from.format(DateRange::QUERY_FORMAT),
                    r.range.to.format(DateRange::QUERY_FORMAT)
                );
                println!("Patients:          {}", r.totals.patients);
                println!("Admissions:        {}", r.totals.admissions);
                println!("Active admissions: {}", r.totals.active_admissions);
                println!("Treatments:        {}", r.totals.treatments);
                for (title, counts) in [
                    ("Patients by status", &r.patients_by_status),
                    ("Admissions by type", &r.admissions_by_type),
                    ("Treatments by outcome", &r.treatments_by_outcome),
                ] {
                    println!("{title}:");
                    for c in counts {
                        println!("  {:<20} {}", c.label, c.count);
                    }
                }
            })?;
        }
        Commands::Nrc { .. } | Commands::Address { .. } => {}
    }

    Ok(())
}
