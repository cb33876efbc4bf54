//! jugglematch - Binary Entry Point
//!
//! Builds a small festival in code, runs the placement engine, and prints
//! the resulting rosters, receipt, and stability verdict. Reading input
//! files and writing report files are left to external collaborators;
//! this binary only demonstrates the typed surface.

use jugglematch::engine::verify_stability;
use jugglematch::types::score::{from_fixed_trimmed, to_fixed};
use jugglematch::{Circuit, Juggler, MatchPool, PlacementEngine, SkillVector};

fn vector(coordination: &str, endurance: &str, flair: &str) -> SkillVector {
    SkillVector::new(
        to_fixed(coordination).expect("valid rating"),
        to_fixed(endurance).expect("valid rating"),
        to_fixed(flair).expect("valid rating"),
    )
}

fn main() {
    println!("===========================================");
    println!("  jugglematch - stable team assignment");
    println!("===========================================");
    println!();

    let mut pool = MatchPool::new();

    let circuits = [
        vector("7", "3", "9"),
        vector("2", "8", "1"),
        vector("5", "5", "5"),
    ];
    for (id, weights) in circuits.into_iter().enumerate() {
        pool.add_circuit(Circuit::new(id as u64, weights))
            .expect("dense circuit ids");
    }

    let jugglers = [
        (vector("9", "2", "5"), vec![0, 1]),
        (vector("4", "9", "1"), vec![1]),
        (vector("6", "6", "6"), vec![2, 0]),
        (vector("8", "1", "7"), vec![0]),
        (vector("3", "7", "2"), vec![1, 2]),
        (vector("5", "4", "8"), vec![0, 2]),
    ];
    for (id, (skills, prefs)) in jugglers.into_iter().enumerate() {
        pool.add_juggler(Juggler::new(id as u64, skills, prefs))
            .expect("unique juggler ids");
    }

    println!(
        "Placing {} jugglers across {} circuits...",
        pool.juggler_count(),
        pool.circuit_count()
    );

    let mut engine = PlacementEngine::new();
    let receipt = match engine.place_all(&mut pool) {
        Ok(receipt) => receipt,
        Err(e) => {
            eprintln!("placement failed: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    for circuit_id in 0..pool.circuit_count() as u64 {
        let roster = pool.roster(circuit_id).expect("known circuit");
        let members: Vec<String> = roster
            .members()
            .iter()
            .map(|&key| {
                let juggler = pool.juggler(key).expect("seated member");
                format!("J{} ({})", juggler.id, from_fixed_trimmed(juggler.match_score))
            })
            .collect();
        println!("  C{}: {}", circuit_id, members.join(", "));
    }

    println!();
    println!("Receipt:");
    println!("  Jugglers placed:  {}", receipt.jugglers_placed);
    println!("  Team capacity:    {}", receipt.team_capacity);
    println!("  Displacements:    {}", receipt.displacements);
    println!("  State root:       {}", receipt.state_root_hex());

    match verify_stability(&pool) {
        Ok(report) if report.is_stable() => {
            println!();
            println!("Stability audit: no blocking pairs");
        }
        Ok(report) => {
            println!();
            println!(
                "Stability audit: {} blocking pair(s) found!",
                report.total_violations()
            );
            for (juggler_id, circuits) in report.violations() {
                println!("  J{} blocked at {:?}", juggler_id, circuits);
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("stability audit failed: {}", e);
            std::process::exit(1);
        }
    }
}
