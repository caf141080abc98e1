use fleetdesk::Overview;
use fleetdesk::domain::{
    Contract, Equipment, InventorySummary, InventoryVehicle, JobCard, MaintenanceRecord, Part,
    Payment, User, Vehicle,
};
use fleetdesk::features::contracts::FinancialSummary;
use fleetdesk::features::fleet::VehicleHealth;
use serde::Serialize;
use std::io::{self, Write};

/// Text form of a record for the terminal.
pub trait Render {
    fn render(&self) -> String;
}

/// Writes records either as text lines or as pretty JSON.
#[derive(Debug)]
pub struct Printer<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> Printer<W> {
    pub const fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub fn records<T: Serialize + Render>(&mut self, items: &[T]) -> io::Result<()> {
        if self.json {
            return self.write_json(&items);
        }
        if items.is_empty() {
            return writeln!(self.out, "No records.");
        }
        for item in items {
            writeln!(self.out, "{}", item.render())?;
        }
        Ok(())
    }

    pub fn record<T: Serialize + Render>(&mut self, item: &T) -> io::Result<()> {
        if self.json {
            return self.write_json(item);
        }
        writeln!(self.out, "{}", item.render())
    }

    pub fn message(&mut self, message: &str) -> io::Result<()> {
        if self.json {
            return self.write_json(&serde_json::json!({ "message": message }));
        }
        writeln!(self.out, "{message}")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

impl Render for Contract {
    fn render(&self) -> String {
        format!(
            "#{:<5} {:<12} {:<24} {:<10} total {:>10.2}  outstanding {:>10.2}",
            self.id,
            self.contract_number,
            self.customer_name,
            self.status.as_str(),
            self.total_amount,
            self.outstanding_balance(),
        )
    }
}

impl Render for Payment {
    fn render(&self) -> String {
        let date = self.payment_date.map_or_else(|| "-".to_owned(), |d| d.to_string());
        format!(
            "#{:<5} {date:<10} {:<8} {:<14} {:>10.2}  {}",
            self.id,
            self.kind.as_str(),
            self.method.as_str(),
            self.amount,
            or_dash(self.reference.as_deref()),
        )
    }
}

impl Render for FinancialSummary {
    fn render(&self) -> String {
        format!(
            "{}\n  paid        {:>10.2}\n  deposits    {:>10.2}\n  outstanding {:>10.2}\n  collected   {:>9.1}%\n  payments    {:>10}",
            self.contract.render(),
            self.total_paid,
            self.deposits,
            self.outstanding_balance,
            self.collection_rate,
            self.payments.len(),
        )
    }
}

impl Render for Vehicle {
    fn render(&self) -> String {
        format!(
            "#{:<5} {:<40} {:<14} {:>8} km  health {:>3}%",
            self.id,
            self.display_name(),
            self.status.as_str(),
            self.mileage,
            self.health_score(),
        )
    }
}

impl Render for VehicleHealth {
    fn render(&self) -> String {
        format!(
            "{}\n  margin      {:>9.1}%\n  service due {}",
            self.vehicle.render(),
            self.profit_margin,
            if self.service_due { "yes" } else { "no" },
        )
    }
}

impl Render for MaintenanceRecord {
    fn render(&self) -> String {
        let date = self.service_date.map_or_else(|| "-".to_owned(), |d| d.to_string());
        format!(
            "#{:<5} {date:<10} {:<10} {:>10.2}  {}",
            self.id, self.service_type.as_str(), self.cost, self.description,
        )
    }
}

impl Render for JobCard {
    fn render(&self) -> String {
        format!(
            "#{:<5} {:<10} {:<14} {:<6} {:<12} {:>10.2}  {}",
            self.id,
            self.job_number,
            self.status.as_str(),
            self.priority.as_str(),
            or_dash(self.vehicle_registration.as_deref()),
            self.total_cost,
            or_dash(self.technician_name.as_deref()),
        )
    }
}

impl Render for User {
    fn render(&self) -> String {
        format!(
            "#{:<5} {:<16} {:<24} {:<10} {}",
            self.id,
            self.username,
            self.full_name(),
            self.role.as_str(),
            if self.is_active { "active" } else { "inactive" },
        )
    }
}

impl Render for Part {
    fn render(&self) -> String {
        format!(
            "#{:<5} {:<12} {:<24} stock {:>5} / reorder {:>4}{}",
            self.id,
            self.part_number,
            self.name,
            self.quantity_in_stock,
            self.reorder_level,
            if self.is_low_stock() { "  LOW" } else { "" },
        )
    }
}

impl Render for Equipment {
    fn render(&self) -> String {
        format!(
            "#{:<5} {:<24} {:<18} {}",
            self.id,
            self.name,
            self.status.as_str(),
            or_dash(self.location.as_deref()),
        )
    }
}

impl Render for InventoryVehicle {
    fn render(&self) -> String {
        let year = self.year.map_or_else(String::new, |y| format!("{y} "));
        format!(
            "#{:<5} {:<10} {year}{} {} {:<10} listed {:>10.2}  margin {:>5.1}%",
            self.id,
            self.stock_number,
            self.make,
            self.model,
            self.status.as_str(),
            self.listed_price,
            self.listed_margin(),
        )
    }
}

impl Render for InventorySummary {
    fn render(&self) -> String {
        format!(
            "parts        {:>8} ({} low)\nstock value  {:>8.2}\nequipment    {:>8} ({} under maintenance)\nvehicles     {:>8}",
            self.total_parts,
            self.low_stock_count,
            self.total_stock_value,
            self.equipment_count,
            self.equipment_under_maintenance,
            self.vehicles_in_stock,
        )
    }
}

impl Render for Overview {
    fn render(&self) -> String {
        format!(
            "vehicles     {:>8} ({} out, {} due service)\nutilization  {:>7.1}%\ncontracts    {:>8} active\noutstanding  {:>8.2}\njob cards    {:>8} open\nlow stock    {:>8} parts",
            self.vehicles_total,
            self.vehicles_in_use,
            self.vehicles_due_service,
            self.fleet_utilization,
            self.active_contracts,
            self.outstanding_balance,
            self.open_job_cards,
            self.low_stock_parts,
        )
    }
}
