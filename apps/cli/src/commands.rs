use crate::output::Printer;
use crate::{
    Command, ContractsCommand, InventoryCommand, JobCardsCommand, ListArgs, LoginArgs,
    UsersCommand, VehiclesCommand,
};
use anyhow::{Context, bail};
use fleetdesk::Fleetdesk;
use fleetdesk::domain::Credentials;
use fleetdesk::http::ListQuery;
use std::io::{BufRead, Write};
use tracing::debug;

impl ListArgs {
    fn to_query(&self) -> ListQuery {
        let mut query = ListQuery::new();
        query.page = self.page;
        query.search.clone_from(&self.search);
        query.ordering.clone_from(&self.ordering);
        match &self.status {
            Some(status) => query.filter("status", status),
            None => query,
        }
    }
}

pub(crate) async fn execute<W: Write>(
    desk: &Fleetdesk,
    command: Command,
    out: &mut Printer<W>,
) -> anyhow::Result<()> {
    debug!(?command, "Executing command");

    match command {
        Command::Login(args) => login(desk, args, out).await,
        Command::Logout => {
            let removed = desk.identity().logout().await.context("Failed to clear session")?;
            out.message(if removed { "Logged out." } else { "No active session." })?;
            Ok(())
        },
        Command::Whoami => {
            let user = desk.identity().current_user().await.context("Failed to load profile")?;
            out.record(&user)?;
            Ok(())
        },
        Command::Overview => {
            out.record(&desk.overview().await)?;
            Ok(())
        },
        Command::Contracts(cmd) => contracts(desk, cmd, out).await,
        Command::Vehicles(cmd) => vehicles(desk, cmd, out).await,
        Command::JobCards(cmd) => job_cards(desk, cmd, out).await,
        Command::Users(cmd) => users(desk, cmd, out).await,
        Command::Inventory(cmd) => inventory(desk, cmd, out).await,
    }
}

async fn login<W: Write>(
    desk: &Fleetdesk,
    args: LoginArgs,
    out: &mut Printer<W>,
) -> anyhow::Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => read_password()?,
    };
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let tokens = desk
        .identity()
        .login(&Credentials::new(args.username.trim(), password))
        .await
        .context("Login failed")?;

    let name = tokens.user.as_ref().map_or_else(|| args.username.clone(), |u| u.full_name());
    out.message(&format!("Logged in as {name}."))?;
    Ok(())
}

fn read_password() -> anyhow::Result<String> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

async fn contracts<W: Write>(
    desk: &Fleetdesk,
    command: ContractsCommand,
    out: &mut Printer<W>,
) -> anyhow::Result<()> {
    let contracts = desk.contracts();
    match command {
        ContractsCommand::List(args) => {
            let list = contracts
                .list_contracts(&args.to_query())
                .await
                .context("Failed to list contracts")?;
            out.records(&list)?;
        },
        ContractsCommand::Show { id } => {
            let summary = contracts
                .financial_summary(id)
                .await
                .with_context(|| format!("Failed to load contract {id}"))?;
            out.record(&summary)?;
        },
        ContractsCommand::Payments { id } => {
            let payments = contracts
                .contract_payments(id)
                .await
                .with_context(|| format!("Failed to load payments for contract {id}"))?;
            out.records(&payments)?;
        },
        ContractsCommand::Terminate { id, reason } => {
            let contract = contracts
                .terminate_contract(id, reason, None)
                .await
                .with_context(|| format!("Failed to terminate contract {id}"))?;
            out.record(&contract)?;
        },
        ContractsCommand::Delete { id } => {
            contracts
                .delete_contract(id)
                .await
                .with_context(|| format!("Failed to delete contract {id}"))?;
            out.message(&format!("Contract {id} deleted."))?;
        },
    }
    Ok(())
}

async fn vehicles<W: Write>(
    desk: &Fleetdesk,
    command: VehiclesCommand,
    out: &mut Printer<W>,
) -> anyhow::Result<()> {
    let fleet = desk.fleet();
    match command {
        VehiclesCommand::List(args) => {
            let list =
                fleet.list_vehicles(&args.to_query()).await.context("Failed to list vehicles")?;
            out.records(&list)?;
        },
        VehiclesCommand::Show { id } => {
            let health = fleet
                .vehicle_health(id)
                .await
                .with_context(|| format!("Failed to load vehicle {id}"))?;
            out.record(&health)?;
        },
        VehiclesCommand::Maintenance { id } => {
            let records = fleet
                .maintenance_records(id)
                .await
                .with_context(|| format!("Failed to load maintenance for vehicle {id}"))?;
            out.records(&records)?;
        },
        VehiclesCommand::Delete { id } => {
            fleet
                .delete_vehicle(id)
                .await
                .with_context(|| format!("Failed to delete vehicle {id}"))?;
            out.message(&format!("Vehicle {id} deleted."))?;
        },
    }
    Ok(())
}

async fn job_cards<W: Write>(
    desk: &Fleetdesk,
    command: JobCardsCommand,
    out: &mut Printer<W>,
) -> anyhow::Result<()> {
    let garage = desk.garage();
    match command {
        JobCardsCommand::List(args) => {
            let list =
                garage.list_job_cards(&args.to_query()).await.context("Failed to list job cards")?;
            out.records(&list)?;
        },
        JobCardsCommand::Show { id } => {
            let card = garage
                .fetch_job_card(id)
                .await
                .with_context(|| format!("Failed to load job card {id}"))?;
            out.record(&card)?;
        },
        JobCardsCommand::Status { id, status } => {
            let card = garage
                .update_job_card_status(id, status)
                .await
                .with_context(|| format!("Failed to update job card {id}"))?;
            out.record(&card)?;
        },
        JobCardsCommand::Assign { id, technician } => {
            let card = garage
                .assign_technician(id, technician)
                .await
                .with_context(|| format!("Failed to assign job card {id}"))?;
            out.record(&card)?;
        },
        JobCardsCommand::Delete { id } => {
            garage
                .delete_job_card(id)
                .await
                .with_context(|| format!("Failed to delete job card {id}"))?;
            out.message(&format!("Job card {id} deleted."))?;
        },
    }
    Ok(())
}

async fn users<W: Write>(
    desk: &Fleetdesk,
    command: UsersCommand,
    out: &mut Printer<W>,
) -> anyhow::Result<()> {
    let identity = desk.identity();
    match command {
        UsersCommand::List(args) => {
            let list =
                identity.list_users(&args.to_query()).await.context("Failed to list users")?;
            out.records(&list)?;
        },
        UsersCommand::Activate { id } => set_active(desk, id, true, out).await?,
        UsersCommand::Deactivate { id } => set_active(desk, id, false, out).await?,
    }
    Ok(())
}

async fn set_active<W: Write>(
    desk: &Fleetdesk,
    id: fleetdesk::domain::Id,
    active: bool,
    out: &mut Printer<W>,
) -> anyhow::Result<()> {
    let user = desk
        .identity()
        .set_user_active(id, active)
        .await
        .with_context(|| format!("Failed to update user {id}"))?;
    out.record(&user)?;
    Ok(())
}

async fn inventory<W: Write>(
    desk: &Fleetdesk,
    command: InventoryCommand,
    out: &mut Printer<W>,
) -> anyhow::Result<()> {
    let inventory = desk.inventory();
    match command {
        InventoryCommand::Parts { list, low_stock: true } => {
            let parts = inventory
                .low_stock_parts(&list.to_query())
                .await
                .context("Failed to list parts")?;
            out.records(&parts)?;
        },
        InventoryCommand::Parts { list, .. } => {
            let parts =
                inventory.list_parts(&list.to_query()).await.context("Failed to list parts")?;
            out.records(&parts)?;
        },
        InventoryCommand::Equipment(args) => {
            let equipment = inventory
                .list_equipment(&args.to_query())
                .await
                .context("Failed to list equipment")?;
            out.records(&equipment)?;
        },
        InventoryCommand::Vehicles(args) => {
            let stock = inventory
                .list_vehicles(&args.to_query())
                .await
                .context("Failed to list stock vehicles")?;
            out.records(&stock)?;
        },
        InventoryCommand::Summary => {
            let summary =
                inventory.inventory_summary().await.context("Failed to load inventory summary")?;
            out.record(&summary)?;
        },
        InventoryCommand::Adjust { part, delta, reason } => {
            let updated = inventory
                .adjust_stock(part, delta, reason)
                .await
                .with_context(|| format!("Failed to adjust stock of part {part}"))?;
            out.record(&updated)?;
        },
    }
    Ok(())
}
