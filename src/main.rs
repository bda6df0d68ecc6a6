use crate::duty::{DutyDay, DutyInterval, DutyStatus};
use crate::evaluator::{HosStatus, Severity, day_totals, evaluate};
use crate::limits::TripProfile;
use crate::planner::plan_day;
use crate::time::Time;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tabled::settings::Style;

mod duty;
mod evaluator;
mod limits;
mod planner;
mod time;

#[derive(Parser)]
struct Args {
    /// Path to the JSON duty-log file
    #[arg(short, long, value_name = "FILE", default_value = "data/default.json")]
    log: PathBuf,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())
        .expect("Failed to spawn pager");

    let mut stdin = pager.stdin.take().expect("Failed to open stdin for pager");

    if let Err(e) = stdin.write_all(content.as_bytes()) {
        // Broken pipe is common if the user quits the pager early
        if e.kind() != std::io::ErrorKind::BrokenPipe {
            eprintln!("Error writing to pager: {}", e);
        }
    }

    // Wait for the user to close the pager before returning to the ">> " prompt
    let _ = pager.wait();
}

fn print_status(status: &HosStatus, unknown: u32) {
    println!(
        "Driving: {:.1} h   On-duty (not driving): {:.1} h   Cycle: {:.1} h",
        status.driving_hours_used, status.on_duty_hours_used, status.cycle_hours_used
    );
    println!(
        "Next 30-minute break due in {:.1} h; on-duty window closes in {:.1} h",
        status.hours_until_break, status.hours_until_off_duty
    );
    if unknown > 0 {
        println!(
            "{} {} interval(s) with unrecognized status were skipped",
            "NOTE".yellow(),
            unknown
        );
    }
    if status.violations.is_empty() {
        println!("{} No violations or warnings", "CLEAR".green().bold());
    } else {
        for violation in &status.violations {
            match violation.severity {
                Severity::Violation => {
                    println!("{} {}", "VIOLATION".red().bold(), violation.message)
                }
                Severity::Warning => match violation.time_remaining {
                    Some(remaining) => println!(
                        "{} {} ({:.1} h remaining)",
                        "WARNING".yellow().bold(),
                        violation.message,
                        remaining
                    ),
                    None => println!("{} {}", "WARNING".yellow().bold(), violation.message),
                },
            }
        }
    }
    if status.can_continue_driving {
        println!("Driver {} continue driving.", "may".green());
    } else {
        println!("Driver {} continue driving.", "may NOT".red().bold());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let mut day = DutyDay::load_from_file(args.log.to_str().unwrap())?;
    println!(
        "Loaded {} duty intervals from {} (prior cycle: {:.1} h)",
        day.intervals.len(),
        args.log.display(),
        day.cycle_hours
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: vec![
            "ls".to_string(),
            "status".to_string(),
            "log".to_string(),
            "plan".to_string(),
            "trip".to_string(),
            "cycle".to_string(),
            "clear".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ],
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => {
                        let sub = parts.get(1).map(|s| *s).unwrap_or("a");
                        let filtered: Vec<&DutyInterval> = day.intervals.iter()
                            .filter(|i| match sub {
                                "d" | "driving" => i.status == DutyStatus::Driving,
                                "n" | "on-duty" => i.status == DutyStatus::OnDuty,
                                "r" | "rest" => i.status.is_rest(),
                                _ => true, // 'ls' or 'ls a'
                            })
                            .collect();
                        if filtered.is_empty() {
                            println!("No matching duty intervals found.")
                        } else {
                            let mut table = tabled::Table::new(&filtered);
                            table.with(Style::rounded());
                            table.with(tabled::settings::Alignment::left());
                            if filtered.len() > 20 {
                                paginate(table.to_string());
                            } else {
                                println!("{}", table);
                            }
                        }
                    },
                    "status" => {
                        let totals = day_totals(&day.intervals, &day.limits);
                        let status = evaluate(&day.intervals, day.cycle_hours, &day.limits);
                        print_status(&status, totals.unknown);
                    },
                    "log" => {
                        if let (Some(raw_status), Some(from), Some(to)) =
                            (parts.get(1), parts.get(2), parts.get(3))
                        {
                            let status = DutyStatus::parse(raw_status);
                            if status == DutyStatus::Unknown {
                                println!(
                                    "Unknown duty status '{}'. Use off-duty, sleeper-berth, driving or on-duty.",
                                    raw_status
                                );
                                continue;
                            }
                            let (start, end) = match (from.parse::<Time>(), to.parse::<Time>()) {
                                (Ok(start), Ok(end)) => (start, end),
                                (Err(e), _) | (_, Err(e)) => {
                                    println!("{}", e);
                                    continue;
                                }
                            };
                            let remarks = if parts.len() > 4 {
                                Some(parts[4..].join(" "))
                            } else {
                                None
                            };
                            let interval = DutyInterval {
                                id: Arc::from(format!("entry-{}", day.intervals.len() + 1)),
                                status,
                                start,
                                end,
                                remarks,
                            };
                            match interval.validate() {
                                Ok(()) => {
                                    day.intervals.push(interval);
                                    println!("Logged. {} intervals on the day.", day.intervals.len());
                                }
                                Err(e) => println!("Rejected: {}", e),
                            }
                        } else {
                            println!("Usage: log <status> <HH:MM> <HH:MM> [remarks]");
                        }
                    },
                    "plan" => {
                        if let (Some(start), Some(hours)) = (parts.get(1), parts.get(2)) {
                            match (start.parse::<Time>(), hours.parse::<f64>()) {
                                (Ok(start), Ok(hours)) if hours >= 0.0 => {
                                    day.intervals = plan_day(start, hours, day.cycle_hours);
                                    println!(
                                        "Planned {} duty blocks covering {:.1} driving hours. Run 'status' to check compliance.",
                                        day.intervals.len(),
                                        hours
                                    );
                                }
                                _ => println!("Usage: plan <HH:MM> <driving-hours>"),
                            }
                        } else {
                            println!("Usage: plan <HH:MM> <driving-hours>");
                        }
                    },
                    "trip" => {
                        if let (Some(start), Some(miles)) = (parts.get(1), parts.get(2)) {
                            let profile = parts.get(3)
                                .and_then(|mph| mph.parse::<f64>().ok())
                                .map(|avg_speed_mph| TripProfile { avg_speed_mph })
                                .unwrap_or_default();
                            match (start.parse::<Time>(), miles.parse::<f64>()) {
                                (Ok(start), Ok(miles)) if miles >= 0.0 => {
                                    let hours = profile.driving_hours(miles);
                                    day.intervals = plan_day(start, hours, day.cycle_hours);
                                    println!(
                                        "{:.0} miles at {:.0} mph comes to {:.1} driving hours; planned {} duty blocks.",
                                        miles, profile.avg_speed_mph, hours, day.intervals.len()
                                    );
                                }
                                _ => println!("Usage: trip <HH:MM> <miles> [avg-mph]"),
                            }
                        } else {
                            println!("Usage: trip <HH:MM> <miles> [avg-mph]");
                        }
                    },
                    "cycle" => {
                        if let Some(hours) = parts.get(1).and_then(|h| h.parse::<f64>().ok()) {
                            day.cycle_hours = hours;
                            println!("Prior cycle hours set to {:.1}.", hours);
                        } else {
                            println!("Usage: cycle <hours>");
                        }
                    },
                    "clear" => {
                        day.intervals.clear();
                        println!("Duty day cleared.");
                    },
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls [filter]              - List duty intervals, or filter by status: d - driving, n - on-duty, r - rest");
                        println!("  status                   - Evaluate the day against the HOS limits");
                        println!("  log <s> <from> <to> [r]  - Append a duty interval (status, HH:MM times, optional remarks)");
                        println!("  plan <HH:MM> <h>         - Replace the day with a generated schedule for <h> driving hours");
                        println!("  trip <HH:MM> <mi> [mph]  - Plan from a route distance using the average-speed profile");
                        println!("  cycle <h>                - Set hours already used in the rolling 8-day cycle");
                        println!("  clear                    - Drop all intervals");
                        println!("  help / ?                 - Show this help menu");
                        println!("  exit / quit              - Exit\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}
