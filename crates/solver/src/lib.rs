//! CP-SAT-style model builder and lexicographic solver driver.
//!
//! `solve` is the single public entry point: it wires together the
//! solver-agnostic building blocks in `seating-core` (room construction,
//! constraint translation, pre-computation, final validation) with the
//! `good_lp`-backed model and multi-pass driver in this crate.

mod driver;
pub mod error;
mod model;

use std::collections::HashMap;

use seating_core::domain::{Room, Student};
use seating_core::precompute::Precomputed;
use seating_core::{objectives, registry, sanity, validate};
use seating_types::{Objectives, OptionsEcho, Position, SolveOptions, SolveReport, SolveRequest};

pub use error::SolveError;

fn parse_table_map<T>(
    raw: &HashMap<String, T>,
) -> Result<HashMap<(u32, u32), T>, seating_core::ConfigError>
where
    T: Clone,
{
    raw.iter()
        .map(|(k, v)| {
            Position::parse_table_key(k)
                .map(|xy| (xy, v.clone()))
                .ok_or_else(|| seating_core::ConfigError::MalformedKey(k.clone()))
        })
        .collect()
}

fn resolve_seed(options: &SolveOptions) -> Option<u64> {
    if options.random_seed.is_some() {
        return options.random_seed;
    }
    if options.vary_each_run {
        use rand::RngCore;
        return Some(rand::thread_rng().next_u64());
    }
    None
}

/// Runs the full pipeline described in the system overview: build room
/// and students, translate constraints and inject locks, pre-compute
/// domains and adjacency, solve up to four lexicographic passes, then
/// redundantly validate the result before handing it back.
pub fn solve(req: &SolveRequest) -> Result<SolveReport, SolveError> {
    let room = Room::from_schema(&req.schema);

    let constraints = registry::translate(
        &req.students,
        &req.constraints_wire,
        &req.forbidden_keys,
        &req.placements,
        req.options.lock_placements,
    )?;

    sanity::preflight(&room, req.students.len(), &constraints)?;

    let mut students: Vec<Student> = req.students.iter().map(Student::from_wire).collect();
    let name_to_id: HashMap<String, String> = req
        .students
        .iter()
        .map(|s| (s.name.clone(), s.id.clone()))
        .collect();

    let seed = resolve_seed(&req.options);
    if req.options.shuffle_students {
        let mut names: Vec<String> = students.iter().map(|s| s.name.clone()).collect();
        driver::shuffle(&mut names, seed);
        let by_name: HashMap<String, Student> =
            students.into_iter().map(|s| (s.name.clone(), s)).collect();
        students = names
            .into_iter()
            .map(|n| by_name.get(&n).cloned().expect("name preserved by shuffle"))
            .collect();
    }

    let visual_row_map = req
        .options
        .visual_row_map
        .as_ref()
        .map(|m| parse_table_map(m))
        .transpose()?;
    let table_offsets = req
        .options
        .table_offsets
        .as_ref()
        .map(|m| parse_table_map(m))
        .transpose()?;

    let student_names: Vec<String> = students.iter().map(|s| s.name.clone()).collect();
    let pc = Precomputed::build(
        room,
        &student_names,
        &constraints,
        req.options.visual_row_order.clone(),
        visual_row_map,
        req.options.geometry,
        table_offsets,
    );

    if let Some((name, _)) = pc.domains.iter().find(|(_, bits)| !bits.iter().any(|&b| b)) {
        return Err(SolveError::Infeasible(format!(
            "student {name} has an empty allowed-seat domain"
        )));
    }

    let (assignment, _driver_objectives) =
        driver::run(&pc, &students, &constraints, &req.options, seed)?;

    validate::final_check(&pc, &students, &assignment, &constraints)
        .map_err(SolveError::FinalCheckFailed)?;

    let final_objectives = objectives::compute(&pc, &students, &assignment);

    let assignment_out: HashMap<String, String> = assignment
        .into_iter()
        .map(|(name, pos)| {
            let id = name_to_id.get(&name).cloned().unwrap_or(name);
            (pos.key(), id)
        })
        .collect();

    Ok(SolveReport {
        status: SolveReport::status_success(),
        assignment: assignment_out,
        options_echo: OptionsEcho {
            solver: "lexicographic-cp-sat-cbc".to_string(),
            time_budget_ms: req.options.time_budget_ms,
            random_seed: seed,
            shuffle_students: req.options.shuffle_students,
            tiebreak_random: req.options.tiebreak_random,
            num_workers: req.options.num_workers,
        },
        objectives: Objectives {
            nb_isolated: final_objectives.nb_isolated,
            nb_same: final_objectives.nb_same,
            sum_y: final_objectives.sum_y,
        },
    })
}
