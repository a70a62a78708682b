use std::fs::File;
use std::process;

use colored::Colorize;

use bandurria::config::{parse_env, parse_env_list, ExperimentConfig};
use bandurria::error::BanditResult;
use bandurria::sweep::{SweepAxis, SweepDriver, SweepPoint};

fn sweep_axis_from_env() -> SweepAxis {
    let times = parse_env_list::<usize>("BANDIT_SWEEP_TIMES");
    let epsilons = parse_env_list::<f64>("BANDIT_SWEEP_EPSILONS");
    let ks = parse_env_list::<usize>("BANDIT_SWEEP_KS");

    let given = [times.is_some(), epsilons.is_some(), ks.is_some()]
        .iter()
        .filter(|&&set| set)
        .count();
    if given > 1 {
        eprintln!("Provide only one of BANDIT_SWEEP_TIMES, BANDIT_SWEEP_EPSILONS, BANDIT_SWEEP_KS");
        process::exit(2);
    }

    if let Some(epsilons) = epsilons {
        SweepAxis::Epsilon(epsilons)
    } else if let Some(ks) = ks {
        SweepAxis::Arms(ks)
    } else {
        SweepAxis::Horizon(times.unwrap_or_else(|| vec![10, 50, 100, 500, 1000]))
    }
}

fn print_point(label: &str, point: &SweepPoint) {
    let verdict = if point.converged {
        "converged".green()
    } else {
        "not converged".red()
    };
    let halfwidth = match point.ci_halfwidth.value() {
        Some(halfwidth) => format!("{:.5}", halfwidth),
        None => "undefined".to_string(),
    };
    println!(
        "{}={:<8} avg_reward={:.4} ci_halfwidth={} {}",
        label, point.value, point.mean_reward, halfwidth, verdict,
    );
}

fn run() -> BanditResult<()> {
    let config = ExperimentConfig::from_env()?;
    let axis = sweep_axis_from_env();
    let label = axis.label();

    let driver = SweepDriver::new(config, axis)?;
    let series = driver.run()?;

    for point in &series {
        print_point(label, point);
    }

    let out_path: String = parse_env("BANDIT_OUT").unwrap_or_else(|| "sweep.json".to_string());
    let file = File::create(&out_path)
        .unwrap_or_else(|e| panic!("can't create {}: {}", out_path, e));
    serde_json::to_writer_pretty(file, &series).expect("can't serialize sweep series");
    println!("wrote {}", out_path);

    Ok(())
}

fn main() {
    log4rs::init_file("log4rs.yaml", Default::default()).unwrap();

    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
