//! # Distinguishability partitioning
//!
//! Builds states whose photons carry polarization and label tags, and shows
//! how `separate_state` splits them into independent, annotation-free
//! sub-states.

use fock_core::{Annotation, FockState};

fn show(text: &str) {
    let state = match FockState::parse(text) {
        Ok(state) => state,
        Err(e) => {
            println!("{:<28} rejected: {}", text, e);
            return;
        }
    };
    let parts: Vec<String> = state.separate_state().iter().map(|p| p.to_string()).collect();
    println!("{:<28} → {}", state, parts.join(" + "));
}

fn main() -> fock_core::Result<()> {
    println!("── tag compatibility ──");
    let h = Annotation::tag("P", "H")?;
    let v = Annotation::tag("P", "V")?;
    let label = Annotation::tag("_", "0")?;
    println!("{{{}}} ~ {{{}}} : {:?}", h, v, h.compatible_annotation(&v).map(|a| a.to_str()));
    println!("{{{}}} ~ {{{}}} : {:?}", h, label, h.compatible_annotation(&label).map(|a| a.to_str()));

    println!("\n── partitions ──");
    show("|2,1>");
    show("|{P:H}1,{P:H}>");
    show("|{P:H}{P:V},{P:H}>");
    show("|{_:0},{_:1},{_:2}>");
    show("|{P:H},1,{P:V}>");
    show("|0{P:H}>");

    println!("\n── tagging an existing state ──");
    let mut state = FockState::from_occupation(&[2, 1]);
    if let Err(e) = state.set_mode_annotations(0, &[h.clone(), v.clone()]) {
        println!("tagging failed: {}", e);
    }
    let parts: Vec<String> = state.separate_state().iter().map(|p| p.to_string()).collect();
    println!("{} → {}", state, parts.join(" + "));
    Ok(())
}
