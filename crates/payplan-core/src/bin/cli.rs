use anyhow::Context;
use clap::Parser;
use payplan::{
    Activity, Config, EnglishFormatter, ScheduleRequest, Session, YearMonth, easter_sunday,
    export, format_date_dmy, swiss_holidays,
};
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "payplan")]
#[command(about = "Monthly lump-sum payment schedules on the Swiss working-day calendar")]
struct Cli {
    /// Rate per working day
    #[arg(long)]
    rate: Option<f64>,

    /// First month of the schedule (YYYY-MM)
    #[arg(long)]
    start: Option<YearMonth>,

    /// Number of months
    #[arg(long)]
    months: Option<u32>,

    /// Write the schedule as CSV and exit
    #[arg(long)]
    export: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "payplan=info".into()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn cell_text(av: &AnyValue<'_>) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        other => other.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (i, value) in values.iter().enumerate() {
            let pad = widths[i].saturating_sub(value.chars().count());
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  calc <rate> <YYYY-MM> <months>     Calculate a new schedule\n  show                               Show the current schedule\n  weeks <month#>                     Show the work plan of a month (1-based)\n  deliver <month#> <text...>         Set deliverables for a month\n  plan <month#> <week#> <supplier|client> <text...>\n                                     Set a work plan entry\n  holidays <year>                    List Swiss holidays of a year\n  easter <year>                      Show Easter Sunday of a year\n  month <YYYY-MM>                    Working days and milestone of one month\n  export <csv|json> <path>           Write the schedule to disk\n  clear                              Discard the current schedule\n  quit|exit                          Exit"
    );
}

fn print_schedule(session: &Session) {
    let Some(schedule) = session.schedule() else {
        println!("No schedule yet. Use 'calc <rate> <YYYY-MM> <months>'.");
        return;
    };
    let fmt = session.formatter();
    match schedule.dataframe(fmt) {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Error rendering schedule: {}", e),
    }
    let totals = schedule.totals();
    println!("Total working days : {}", totals.working_days);
    println!("Total lump sum     : {}", fmt.currency(totals.lump_sum));
}

fn print_weeks(session: &Session, month_no: usize) {
    let Some(month) = session
        .schedule()
        .and_then(|s| month_no.checked_sub(1).and_then(|i| s.month(i)))
    else {
        println!("Month {} not found.", month_no);
        return;
    };
    println!("{}", month.milestone_label(session.formatter()));
    for week in &month.work_plan.weeks {
        println!(
            "  {:<24} {} days | supplier: {} | client: {}",
            week.label(),
            week.working_days,
            week.supplier,
            week.client
        );
    }
}

fn parse_month_no(s: Option<&str>) -> Option<usize> {
    s.and_then(|v| v.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
}

fn run_repl(session: &mut Session) {
    println!("Payment Planner (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_schedule(session),
            "clear" => {
                session.clear();
                println!("Schedule cleared.");
            }
            "calc" => {
                let rate = parts.next().and_then(|s| s.parse::<f64>().ok());
                let start = parts.next().map(str::parse::<YearMonth>);
                let months = parts.next().and_then(|s| s.parse::<u32>().ok());
                match (rate, start, months) {
                    (Some(rate), Some(Ok(start)), Some(months)) => {
                        let request = ScheduleRequest::new(rate, start, months);
                        if let Err(e) = session.submit(&request) {
                            println!("Error: {}", e);
                            continue;
                        }
                        if let Some(schedule) = session.schedule() {
                            println!(
                                "Calculated ({}).",
                                schedule.to_cli_summary(session.formatter())
                            );
                        }
                        print_schedule(session);
                    }
                    (_, Some(Err(e)), _) => println!("Error: {}", e),
                    _ => println!("Usage: calc <rate> <YYYY-MM> <months>"),
                }
            }
            "weeks" => match parts.next().and_then(|s| s.parse::<usize>().ok()) {
                Some(n) => print_weeks(session, n),
                None => println!("Usage: weeks <month#>"),
            },
            "deliver" => {
                let index = parse_month_no(parts.next());
                let rest: Vec<&str> = parts.collect();
                match index {
                    Some(index) => match session.set_deliverables(index, rest.join(" ")) {
                        Ok(_) => println!("Deliverables set for month {}.", index + 1),
                        Err(e) => println!("Error: {}", e),
                    },
                    None => println!("Usage: deliver <month#> <text...>"),
                }
            }
            "plan" => {
                let index = parse_month_no(parts.next());
                let week = parts.next().and_then(|s| s.parse::<u32>().ok());
                let activity = parts.next().map(str::parse::<Activity>);
                let rest: Vec<&str> = parts.collect();
                match (index, week, activity) {
                    (Some(index), Some(week), Some(Ok(activity))) => {
                        match session.set_work_plan_entry(index, week, activity, rest.join(" ")) {
                            Ok(_) => println!(
                                "Work plan {} entry set for month {} week {}.",
                                activity,
                                index + 1,
                                week
                            ),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    (_, _, Some(Err(e))) => println!("Error: {}", e),
                    _ => println!("Usage: plan <month#> <week#> <supplier|client> <text...>"),
                }
            }
            "holidays" => match parts.next().and_then(|s| s.parse::<i32>().ok()) {
                Some(year) => match swiss_holidays(year) {
                    Ok(set) => {
                        for (date, kind) in set.iter() {
                            println!("  {}  {:<3} {}", format_date_dmy(date), date.format("%a"), kind);
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: holidays <year>"),
            },
            "easter" => match parts.next().and_then(|s| s.parse::<i32>().ok()) {
                Some(year) => match easter_sunday(year) {
                    Ok(date) => println!("Easter Sunday {}: {}", year, format_date_dmy(date)),
                    Err(e) => println!("Error: {}", e),
                },
                None => println!("Usage: easter <year>"),
            },
            "month" => match parts.next().map(str::parse::<YearMonth>) {
                Some(Ok(period)) => {
                    let calendar = session.calendar();
                    let fmt = session.formatter();
                    match (
                        calendar.working_days_in_month(period),
                        calendar.last_working_day_of_month(period),
                    ) {
                        (Ok(days), Ok(milestone)) => println!(
                            "{}: {} working days, milestone {}",
                            fmt.month_label(period),
                            days,
                            fmt.date(milestone)
                        ),
                        (Err(e), _) | (_, Err(e)) => println!("Error: {}", e),
                    }
                }
                Some(Err(e)) => println!("Error: {}", e),
                None => println!("Usage: month <YYYY-MM>"),
            },
            "export" => {
                let fmt_s = parts.next();
                let path = parts.next();
                let Some(schedule) = session.schedule() else {
                    println!("No schedule to export.");
                    continue;
                };
                let res = match (fmt_s, path) {
                    (Some("csv"), Some(path)) => {
                        export::write_schedule_csv(schedule, session.formatter(), path)
                    }
                    (Some("json"), Some(path)) => export::write_schedule_json(schedule, path),
                    _ => {
                        println!("Usage: export <csv|json> <path>");
                        continue;
                    }
                };
                match res {
                    Ok(_) => println!("Schedule exported to {}.", path.unwrap_or_default()),
                    Err(e) => println!("Error exporting schedule: {}", e),
                }
            }
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env().context("reading configuration")?;
    let mut session = Session::with_formatter(Box::new(EnglishFormatter::with_currency(
        config.currency.clone(),
    )));

    if cli.rate.is_none() && cli.start.is_none() && cli.months.is_none() && cli.export.is_none()
    {
        run_repl(&mut session);
        return Ok(());
    }

    let (Some(rate), Some(start), Some(months)) =
        (cli.rate.or(config.default_rate), cli.start, cli.months)
    else {
        anyhow::bail!(
            "one-shot mode needs --rate (or PAYPLAN_DEFAULT_RATE), --start and --months"
        );
    };

    let request = ScheduleRequest::new(rate, start, months);
    session.submit(&request).context("calculating schedule")?;
    match cli.export {
        Some(path) => {
            let schedule = session.require_schedule()?;
            export::write_schedule_csv(schedule, session.formatter(), &path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Schedule exported to {}.", path.display());
        }
        None => print_schedule(&session),
    }
    Ok(())
}
