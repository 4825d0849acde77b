//! `warehouse`: prints inventory and movement reports.
//!
//! ```text
//! warehouse [inventory|movements|all]
//! ```
//!
//! The backend is chosen through `WAREHOUSE_REPOSITORY` / `WAREHOUSE_DATA_PATH`
//! (see `warehouse_infra::config`); logging through `RUST_LOG` and
//! `WAREHOUSE_LOG_FORMAT`.

use std::str::FromStr;

use anyhow::{Context, bail};

use warehouse_infra::{Repository, WarehouseConfig, WarehouseService};
use warehouse_observability::LogFormat;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
enum ReportSelection {
    Inventory,
    Movements,
    #[default]
    All,
}

impl FromStr for ReportSelection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inventory" => Ok(ReportSelection::Inventory),
            "movements" => Ok(ReportSelection::Movements),
            "all" => Ok(ReportSelection::All),
            other => bail!("unknown report {other:?} (expected inventory, movements or all)"),
        }
    }
}

fn parse_args<I>(mut args: I) -> anyhow::Result<ReportSelection>
where
    I: Iterator<Item = String>,
{
    let selection = match args.next() {
        Some(arg) => arg.parse()?,
        None => ReportSelection::default(),
    };
    if let Some(extra) = args.next() {
        bail!("unexpected argument {extra:?}");
    }
    Ok(selection)
}

fn render<R: Repository>(
    service: &WarehouseService<R>,
    selection: ReportSelection,
) -> anyhow::Result<String> {
    let text = match selection {
        ReportSelection::Inventory => service.generate_inventory_report_text()?,
        ReportSelection::Movements => service.generate_movement_report_text(),
        ReportSelection::All => format!(
            "{}\n{}",
            service.generate_inventory_report_text()?,
            service.generate_movement_report_text()
        ),
    };
    Ok(text)
}

fn main() -> anyhow::Result<()> {
    warehouse_observability::init_with(LogFormat::from_env()?);

    let selection = parse_args(std::env::args().skip(1))?;
    let config = WarehouseConfig::from_env()?;
    tracing::debug!(?config, ?selection, "starting");

    let repository = config
        .build_repository()
        .with_context(|| format!("failed to open {:?} repository", config.repository))?;
    let service = WarehouseService::new(repository);

    print!("{}", render(&service, selection)?);
    Ok(())
}
