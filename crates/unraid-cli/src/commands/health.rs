//! Aggregated health summary.
//!
//! Pulls the array, parity, Docker, metrics, and notification state in one
//! pass and prints a colored verdict. Output is always human-oriented; the
//! structured modes are ignored here.

use std::io::Write;

use unraid_client::types::{ArrayInfo, Container, Metrics, NotificationOverview, ParityCheck};
use unraid_client::Client;

use crate::commands::DEFAULT_TIMEOUT;
use crate::error::CliError;
use crate::output::color;

/// Severity of one health finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Ok,
    Info,
    Warn,
    Fail,
}

type Finding = (Level, String);

/// Executes the `health` command.
pub struct HealthCommand<'a> {
    client: &'a Client,
}

impl<'a> HealthCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run the `health` command.
    ///
    /// A section whose query fails is reported as a failure but does not
    /// abort the rest of the summary.
    ///
    /// # Errors
    ///
    /// Returns an error when output writing fails.
    pub async fn execute<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let mut findings = Vec::new();

        match self.client.array(DEFAULT_TIMEOUT).await {
            Ok(array) => findings.extend(array_findings(&array)),
            Err(e) => findings.push((Level::Fail, format!("Array query failed: {e}"))),
        }
        match self.client.parity_status(DEFAULT_TIMEOUT).await {
            Ok(check) => findings.extend(parity_findings(&check)),
            Err(e) => findings.push((Level::Fail, format!("Parity query failed: {e}"))),
        }
        match self.client.containers(DEFAULT_TIMEOUT).await {
            Ok(containers) => findings.extend(docker_findings(&containers)),
            Err(e) => findings.push((Level::Fail, format!("Docker query failed: {e}"))),
        }
        match self.client.metrics(DEFAULT_TIMEOUT).await {
            Ok(metrics) => findings.extend(metrics_findings(&metrics)),
            Err(e) => findings.push((Level::Fail, format!("Metrics query failed: {e}"))),
        }
        match self.client.notification_overview(DEFAULT_TIMEOUT).await {
            Ok(overview) => findings.extend(notification_findings(&overview)),
            Err(e) => findings.push((Level::Fail, format!("Notification query failed: {e}"))),
        }

        for (level, message) in &findings {
            writeln!(writer, "{}", styled(*level, message))?;
        }
        writeln!(writer)?;
        let (level, message) = verdict(&findings);
        writeln!(writer, "{}", styled(level, &message))?;
        Ok(())
    }
}

fn styled(level: Level, message: &str) -> String {
    match level {
        Level::Ok => color::success(message),
        Level::Info => color::info(message),
        Level::Warn => color::warning(message),
        Level::Fail => color::error(message),
    }
}

fn array_findings(array: &ArrayInfo) -> Vec<Finding> {
    let mut findings = Vec::new();

    if array.state.eq_ignore_ascii_case("STARTED") {
        findings.push((Level::Ok, "Array is started".to_string()));
    } else {
        findings.push((Level::Warn, format!("Array is {}", array.state)));
    }

    let disks = array.all_disks();
    let unhealthy: Vec<&str> = disks
        .iter()
        .filter(|d| !matches!(d.status.as_str(), "DISK_OK" | "DISK_NP" | ""))
        .map(|d| d.name.as_str())
        .collect();
    if unhealthy.is_empty() {
        findings.push((Level::Ok, format!("All {} disks healthy", disks.len())));
    } else {
        findings.push((
            Level::Fail,
            format!("Disks reporting problems: {}", unhealthy.join(", ")),
        ));
    }

    findings
}

fn parity_findings(check: &ParityCheck) -> Vec<Finding> {
    if check.running {
        return vec![(
            Level::Info,
            format!("Parity check in progress ({}%)", check.progress),
        )];
    }
    if check.date.is_empty() {
        return vec![(Level::Info, "No parity check on record".to_string())];
    }
    if check.errors > 0 {
        return vec![(
            Level::Warn,
            format!("Last parity check found {} errors", check.errors),
        )];
    }
    vec![(
        Level::Ok,
        format!("Last parity check clean ({})", check.date),
    )]
}

fn docker_findings(containers: &[Container]) -> Vec<Finding> {
    let running = containers
        .iter()
        .filter(|c| c.state.eq_ignore_ascii_case("RUNNING"))
        .count();
    let mut findings = vec![(
        Level::Ok,
        format!("{running} of {} containers running", containers.len()),
    )];

    let stopped_autostart: Vec<&str> = containers
        .iter()
        .filter(|c| c.auto_start && !c.state.eq_ignore_ascii_case("RUNNING"))
        .map(Container::display_name)
        .collect();
    if !stopped_autostart.is_empty() {
        findings.push((
            Level::Warn,
            format!(
                "Autostart containers not running: {}",
                stopped_autostart.join(", ")
            ),
        ));
    }

    findings
}

fn metrics_findings(metrics: &Metrics) -> Vec<Finding> {
    let mut findings = Vec::new();

    let cpu = metrics.cpu.percent_total;
    if cpu >= 90.0 {
        findings.push((Level::Warn, format!("CPU usage high ({cpu:.1}%)")));
    } else {
        findings.push((Level::Ok, format!("CPU usage {cpu:.1}%")));
    }

    let memory = metrics.memory.percent_total;
    if memory >= 90.0 {
        findings.push((Level::Warn, format!("Memory usage high ({memory:.1}%)")));
    } else {
        findings.push((Level::Ok, format!("Memory usage {memory:.1}%")));
    }

    findings
}

fn notification_findings(overview: &NotificationOverview) -> Vec<Finding> {
    let unread = overview.unread;
    if unread.alert > 0 {
        return vec![(
            Level::Fail,
            format!("{} unread alerts", unread.alert),
        )];
    }
    if unread.warning > 0 {
        return vec![(
            Level::Warn,
            format!("{} unread warnings", unread.warning),
        )];
    }
    vec![(Level::Ok, "No unread alerts".to_string())]
}

fn verdict(findings: &[Finding]) -> Finding {
    let fails = findings.iter().filter(|(l, _)| *l == Level::Fail).count();
    let warns = findings.iter().filter(|(l, _)| *l == Level::Warn).count();

    if fails > 0 {
        (Level::Fail, format!("{fails} problems found"))
    } else if warns > 0 {
        (Level::Warn, format!("{warns} warnings"))
    } else {
        (Level::Ok, "All systems healthy".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unraid_client::types::ArrayDisk;

    #[test]
    fn healthy_array_yields_ok_findings() {
        let array = ArrayInfo {
            state: "STARTED".into(),
            disks: vec![
                ArrayDisk {
                    name: "disk1".into(),
                    status: "DISK_OK".into(),
                    ..Default::default()
                },
                ArrayDisk {
                    name: "disk2".into(),
                    status: "DISK_OK".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let findings = array_findings(&array);
        assert!(findings.iter().all(|(l, _)| *l == Level::Ok));
        assert!(findings[1].1.contains("All 2 disks"));
    }

    #[test]
    fn bad_disk_is_a_failure() {
        let array = ArrayInfo {
            state: "STARTED".into(),
            disks: vec![ArrayDisk {
                name: "disk1".into(),
                status: "DISK_DSBL".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = array_findings(&array);
        assert_eq!(findings[1].0, Level::Fail);
        assert!(findings[1].1.contains("disk1"));
    }

    #[test]
    fn stopped_autostart_container_warns() {
        let containers = vec![
            Container {
                names: vec!["/plex".into()],
                state: "EXITED".into(),
                auto_start: true,
                ..Default::default()
            },
            Container {
                names: vec!["/debug".into()],
                state: "EXITED".into(),
                auto_start: false,
                ..Default::default()
            },
        ];

        let findings = docker_findings(&containers);
        assert_eq!(findings[1].0, Level::Warn);
        assert!(findings[1].1.contains("plex"));
        assert!(!findings[1].1.contains("debug"));
    }

    #[test]
    fn parity_errors_warn_and_running_informs() {
        let clean = ParityCheck {
            date: "2025-11-01".into(),
            ..Default::default()
        };
        assert_eq!(parity_findings(&clean)[0].0, Level::Ok);

        let dirty = ParityCheck {
            date: "2025-11-01".into(),
            errors: 5,
            ..Default::default()
        };
        assert_eq!(parity_findings(&dirty)[0].0, Level::Warn);

        let running = ParityCheck {
            running: true,
            progress: 40,
            ..Default::default()
        };
        let findings = parity_findings(&running);
        assert_eq!(findings[0].0, Level::Info);
        assert!(findings[0].1.contains("40%"));
    }

    #[test]
    fn verdict_escalates_to_worst_level() {
        let all_ok = vec![(Level::Ok, String::new()), (Level::Info, String::new())];
        assert_eq!(verdict(&all_ok).0, Level::Ok);

        let warned = vec![(Level::Ok, String::new()), (Level::Warn, String::new())];
        assert_eq!(verdict(&warned).0, Level::Warn);

        let failed = vec![(Level::Warn, String::new()), (Level::Fail, String::new())];
        assert_eq!(verdict(&failed).0, Level::Fail);
    }

    #[test]
    fn alerts_trump_warnings_in_notifications() {
        use unraid_client::types::NotificationCounts;

        let overview = NotificationOverview {
            unread: NotificationCounts {
                alert: 1,
                warning: 4,
                ..Default::default()
            },
            archive: NotificationCounts::default(),
        };
        assert_eq!(notification_findings(&overview)[0].0, Level::Fail);
    }
}
