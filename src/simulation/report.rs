use crate::simulation::world::SimulationTrace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A finished run packaged for an external consumer.
///
/// Carries the steady-state wage alongside the trace since plots draw the
/// paths against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    periods: usize,
    wstar: f64,
    trace: SimulationTrace,
}

impl SimulationReport {
    pub fn new(trace: SimulationTrace, wstar: f64) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            periods: trace.len(),
            wstar,
            trace,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    pub fn wstar(&self) -> f64 {
        self.wstar
    }

    pub fn trace(&self) -> &SimulationTrace {
        &self.trace
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Simulation {} ===", self.run_id)?;
        writeln!(f, "Generated:  {}", self.generated_at.to_rfc3339())?;
        writeln!(f, "Periods:    {}", self.periods)?;
        writeln!(f, "w*:         {:.6}", self.wstar)?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>4}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}",
            "t", "w_x", "w_y", "r", "ca_x", "ca_y"
        )?;
        for record in self.trace.records() {
            writeln!(
                f,
                "{:>4}  {:>10.6}  {:>10.6}  {:>10.6}  {:>10.6}  {:>10.6}",
                record.t,
                record.wage_x,
                record.wage_y,
                record.rate,
                record.current_account_x,
                record.current_account_y
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::Country;
    use crate::core::economy::Economy;
    use crate::core::moral_hazard::{MoralHazardEconomy, MoralHazardParams};
    use crate::simulation::world::{simulate, SimulationOptions};

    fn report() -> SimulationReport {
        let economy = MoralHazardEconomy::new(MoralHazardParams::default()).unwrap();
        let wstar = economy.wstar();
        let mut x = Country::new("X", economy.clone(), 0.2).unwrap();
        let mut y = Country::new("Y", economy, 0.7).unwrap();
        let trace = simulate(4, &mut x, &mut y, None, None, &SimulationOptions::default()).unwrap();
        SimulationReport::new(trace, wstar)
    }

    #[test]
    fn test_report_serializes() {
        let report = report();
        let json = serde_json::to_string(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["periods"], 4);
        assert_eq!(parsed["trace"]["records"].as_array().unwrap().len(), 4);
        assert_eq!(parsed["run_id"], report.run_id().to_string());
    }

    #[test]
    fn test_report_display_has_row_per_period() {
        let report = report();
        let text = format!("{}", report);
        assert!(text.contains("w*:"));
        // header block is 6 lines, then one row per period
        assert_eq!(text.lines().count(), 6 + report.periods());
    }

    #[test]
    fn test_distinct_run_ids() {
        assert_ne!(report().run_id(), report().run_id());
    }
}
