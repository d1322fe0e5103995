//! Drives whole sessions through the library API, the same way the binary
//! does with `--script`.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use ebitda_core::{Scenario, SessionState, Step};
use rust_decimal::Decimal;
use ebitda_ui::{App, views::RenderOptions};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn plain_app() -> App {
    App::new(SessionState::new(), RenderOptions { color: false })
}

fn run_script(
    app: &mut App,
    script: &str,
) -> String {
    let mut out = Vec::new();
    app.run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn fixture_walkthrough_recovers_part_of_the_energy_spike() {
    let mut app = plain_app();
    let file = File::open(fixture_path("energy_walkthrough.txt")).unwrap();
    let mut out = Vec::new();

    app.run(BufReader::new(file), &mut out).unwrap();

    let session = &app.session;
    assert_eq!(session.scenario(), Scenario::EnergySpike);
    assert_eq!(session.step(), Step::Contribution);
    assert_eq!(session.inputs().energy_per_ton, dec!(19));
    assert_eq!(session.inputs().fixed_cost, dec!(120000));
    // 1,100 processed tons at $49 variable cost per ton.
    assert_eq!(session.current_results().ebitda, dec!(26100));
    assert_eq!(session.baseline().ebitda, dec!(14000));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Loaded Energy spike; original EBITDA is $14,000"));
    assert!(text.contains("Energy per ton = 19"));
    assert!(text.contains("error: 'Fixed cost' is locked during 3) Contribution"));
}

#[test]
fn first_screen_is_the_revenue_lesson() {
    let text = run_script(&mut plain_app(), "");

    assert!(text.starts_with("Scenario: Base case\n"));
    assert!(text.contains("Step: 1) Revenue"));
    assert!(text.contains("$200,000"));
}

#[test]
fn reset_keeps_scenario_but_restores_defaults() {
    let mut app = plain_app();

    run_script(&mut app, "load price pressure\nreset\n");

    assert_eq!(app.session.scenario(), Scenario::PricePressure);
    assert_eq!(app.session.inputs().unit_price, dec!(200));
    assert_eq!(app.session.baseline().ebitda, dec!(30500));
}

#[test]
fn desktop_layout_marks_direction_of_change() {
    let mut app = plain_app();

    let text = run_script(&mut app, "mobile off\nexplore on\nset fixed_cost 100000\n");

    assert!(text.contains("▲ $50,500"));
    assert!(text.contains("▼ $-20,000"));
}

#[test]
fn export_writes_comparison_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.csv");
    let mut app = plain_app();

    let text = run_script(
        &mut app,
        &format!("step 4\nset fixed_cost $100,000\nexport {}\n", path.display()),
    );

    assert!(text.contains("Wrote "));
    let csv = fs::read_to_string(&path).unwrap();
    assert_eq!(
        csv,
        "metric,current,original_scenario,variance\n\
         Revenue,200000,200000,0\n\
         Variable Cost,49500,49500,0\n\
         Contribution,150500,150500,0\n\
         Fixed Cost,100000,120000,-20000\n\
         EBITDA,50500,30500,20000\n"
    );
}

#[test]
fn export_to_missing_directory_is_reported_not_fatal() {
    let mut app = plain_app();

    let text = run_script(&mut app, "export /no/such/dir/out.csv\nnext\n");

    assert!(text.contains("error: cannot create '/no/such/dir/out.csv'"));
    assert_eq!(app.session.step(), Step::VariableCost);
}

#[test]
fn revenue_overflow_is_reported_and_session_survives() {
    let mut app = plain_app();

    let text = run_script(
        &mut app,
        "explore on\nset unit_price 1e20\nset net_saleable_tons 1e10\nshow\n",
    );

    assert!(text.contains("error: 'Net saleable tons' cannot be"));
    assert!(text.contains("Revenue is too large to represent"));
    assert_eq!(app.session.inputs().net_saleable_tons, dec!(1000));
    assert_eq!(
        app.session.current_results().revenue,
        Decimal::from_scientific("1e23").unwrap()
    );
}

#[test]
fn tiny_revenue_is_rejected_before_ratios_overflow() {
    let mut app = plain_app();

    let text = run_script(
        &mut app,
        "explore on\nset unit_price 0.0000000000000000000000001\nset net_saleable_tons 0.001\nmobile off\n",
    );

    assert!(text.contains("Contribution % is too large to represent"));
    assert_eq!(app.session.inputs().net_saleable_tons, dec!(1000));
    assert!(text.contains("[1) Revenue]"));
}

#[test]
fn decimal_max_price_is_rejected_at_default_volume() {
    let mut app = plain_app();

    let text = run_script(&mut app, "set unit_price 79228162514264337593543950335\n");

    assert!(text.contains("error: 'Unit price' cannot be 79228162514264337593543950335"));
    assert_eq!(app.session.inputs().unit_price, dec!(200));
}

#[test]
fn decimal_max_revenue_renders_in_both_layouts() {
    let mut app = plain_app();

    let text = run_script(
        &mut app,
        "explore on\nset net_saleable_tons 1\nset unit_price 79228162514264337593543950335\nmobile off\ninc unit_price\n",
    );

    assert_eq!(app.session.current_results().revenue, Decimal::MAX);
    assert!(text.contains("$79,228,162,514,264,337,593,543,950,335"));
    assert!(text.contains("error: 'Unit price' is already at 79228162514264337593543950335"));
}

