//! # Wizard Demo - Declarative Onboarding Navigation
//!
//! Builds the rule graph of a small onboarding wizard and steers it with
//! `forward`/`present`/`dismiss`, printing the engine state after each
//! step. Run with `RUST_LOG=debug` to watch the engine's own tracing.
//!
//! ```bash
//! cargo run --bin wizard-demo
//! ```

use anyhow::Result;
use helm::prelude::*;
use tracing_subscriber::EnvFilter;

// ============================================================================
// 1. Define the Rule Graph
// ============================================================================

fn wizard_rules() -> NavGraph<&'static str> {
    [
        // the only way in
        Segue::new("launch", "welcome"),
        // the happy path
        Segue::new("welcome", "account").with_tag("to-account"),
        Segue::new("account", "plan").with_tag("to-plan"),
        Segue::new("plan", "summary").with_tag("to-summary"),
        // a confirmation toast that announces itself
        Segue::new("summary", "confirmed").auto(),
        // detours the user can back out of
        Segue::new("welcome", "help").dismissable(),
        Segue::new("account", "help").dismissable(),
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// 2. Steer the Engine
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rules = wizard_rules();
    println!("rule graph:\n{}\n", serde_json::to_string_pretty(&rules)?);

    let mut helm = Helm::new(rules)?;

    helm.forward(); // launch -> welcome, the unique inlet
    report(&helm, "forward");

    helm.present("help");
    report(&helm, "present(help)");

    helm.dismiss("help");
    report(&helm, "dismiss(help)");

    helm.present_tag("to-account");
    report(&helm, "present_tag(to-account)");

    helm.present_tag("to-plan");
    helm.present_tag("to-summary"); // reaching summary chases the auto segue
    report(&helm, "present_tag(to-summary)");

    helm.present("nowhere");
    report(&helm, "present(nowhere)");

    for error in helm.drain_errors() {
        println!("logged failure: {error}");
    }

    Ok(())
}

fn report(helm: &Helm<&'static str>, step: &str) {
    let sections: Vec<&&str> = helm.presented_sections().collect();
    println!(
        "{step:<22} rev={} presented={sections:?} path_len={}",
        helm.revision(),
        helm.path().len(),
    );
}
