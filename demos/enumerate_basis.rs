//! # Basis enumeration walk-through
//!
//! Enumerates the full basis of 3 photons over 4 modes, printing each state
//! with its normalisation weight, then shows tensor products and slicing on
//! a sample state.

use fock_core::{basis_size, FockState};

fn main() {
    let (m, n) = (4, 3);
    println!("── basis of {} photons over {} modes ({} states) ──", n, m, basis_size(m, n));
    for (i, state) in FockState::basis(m, n).enumerate() {
        let weight = state.prodnfact().unwrap_or(0);
        println!("{:>3}  {}  prodnfact={}  hash={:016x}", i, state, weight, state.hash64());
    }

    // Manual stepping ends in the Undefined state.
    let mut s = FockState::parse("|0,1,2>").unwrap_or_default();
    while s.is_defined() {
        print!("{} → ", s);
        if s.next_state().is_err() {
            break;
        }
    }
    println!("{} (undefined)", s);

    println!("\n── algebra ──");
    let a = FockState::parse("|1,0>").unwrap_or_default();
    let b = FockState::parse("[0,2,1]").unwrap_or_default();
    match &a * &b {
        Ok(ab) => println!("{} ⊗ {} = {}", a, b, ab),
        Err(e) => println!("tensor failed: {}", e),
    }

    let wide = FockState::from_occupation(&[1, 2, 0, 3, 1]);
    for (start, end, step) in [(1, 4, 1), (-2, 5, 1), (0, 5, 2)] {
        match wide.slice(start, end, step) {
            Ok(part) => println!("{}[{}:{}:{}] = {}", wide, start, end, step, part),
            Err(e) => println!("slice failed: {}", e),
        }
    }
    match wide.set_slice(&FockState::from_occupation(&[9, 9]), 1, 3) {
        Ok(spliced) => println!("{} with [1:3] ← |9,9> = {}", wide, spliced),
        Err(e) => println!("set_slice failed: {}", e),
    }
}
