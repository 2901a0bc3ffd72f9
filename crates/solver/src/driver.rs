use good_lp::{default_solver, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use seating_core::domain::{Assignment, Student};
use seating_core::{ConstraintKind, Objectives, Precomputed};
use seating_types::SolveOptions;

use crate::error::SolveError;
use crate::model::{self, BuiltModel};

pub(crate) fn shuffle(names: &mut [String], seed: Option<u64>) {
    use rand::seq::SliceRandom;
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    names.shuffle(&mut rng);
}

#[derive(Default, Clone, Copy)]
struct Frozen {
    nb_isolated: Option<f64>,
    nb_same: Option<f64>,
    sum_y: Option<f64>,
}

enum Direction {
    Minimize,
    Maximize,
}

struct PassResult {
    assignment: Assignment,
    nb_isolated: f64,
    nb_same: f64,
    sum_y: f64,
}

fn run_pass(
    pass_name: &'static str,
    students: &[Student],
    pc: &Precomputed,
    constraints: &[ConstraintKind],
    frozen: &Frozen,
    pass_budget_ms: u64,
    num_workers: u32,
    seed: Option<u64>,
    objective: impl FnOnce(&BuiltModel) -> (Expression, Direction),
) -> Result<PassResult, SolveError> {
    let mut vars = ProblemVariables::new();
    let bm = model::build(students, pc, &mut vars);

    let (obj_expr, direction) = objective(&bm);
    let mut model = match direction {
        Direction::Maximize => vars.maximise(obj_expr).using(default_solver),
        Direction::Minimize => vars.minimise(obj_expr).using(default_solver),
    };

    // CBC's own CLI-style parameter names; "seconds" bounds wall-clock time per
    // pass (spec §5's per-pass budget share), "threads" maps num_workers onto
    // CBC's parallel branch-and-cut, "randomSeed" makes tie-breaking among
    // equally-good incumbents reproducible for a fixed engine seed.
    let seconds = (pass_budget_ms as f64 / 1000.0).max(0.001);
    model.set_parameter("seconds", &seconds.to_string());
    model.set_parameter("threads", &num_workers.max(1).to_string());
    if let Some(s) = seed {
        model.set_parameter("randomSeed", &s.to_string());
    }

    model = model::add_assignment_constraints(model, students, &bm);
    model = model::add_seat_exclusivity_and_occupancy(model, pc, students, &bm);
    model = model::add_binary_constraints(model, pc, students, &bm, constraints);
    model = model::add_isolation_constraints(model, pc, &bm);
    model = model::add_mixage_constraints(model, pc, students, &bm);

    if let Some(v) = frozen.nb_isolated {
        model = model.with(model::nb_isolated_expr(&bm).eq(v));
    }
    if let Some(v) = frozen.nb_same {
        model = model.with(model::nb_same_expr(&bm).eq(v));
    }
    if let Some(v) = frozen.sum_y {
        model = model.with(model::sum_y_expr(pc, students, &bm).eq(v));
    }

    tracing::debug!(pass = pass_name, "solving lexicographic pass");
    match model.solve() {
        Ok(sol) => {
            let assignment = model::extract_assignment(pc, students, &bm, &sol);
            let nb_isolated = sol.eval(model::nb_isolated_expr(&bm));
            let nb_same = sol.eval(model::nb_same_expr(&bm));
            let sum_y = sol.eval(model::sum_y_expr(pc, students, &bm));
            tracing::debug!(pass = pass_name, nb_isolated, nb_same, sum_y, "pass solved");
            Ok(PassResult { assignment, nb_isolated, nb_same, sum_y })
        }
        Err(ResolutionError::Infeasible) => {
            tracing::warn!(pass = pass_name, "lexicographic pass proven infeasible");
            Err(SolveError::Infeasible(format!(
                "pass {pass_name} has no feasible assignment under the given constraints"
            )))
        }
        Err(e) => {
            // CBC can't be unbounded on a pure 0/1 assignment model, so any
            // non-infeasibility error here means it hit the "seconds" cap
            // before finding an incumbent.
            tracing::warn!(pass = pass_name, error = %e, budget_ms = pass_budget_ms, "lexicographic pass exhausted its time budget without a feasible solution");
            Err(SolveError::BudgetExhausted)
        }
    }
}

fn random_weighted_objective(students: &[Student], pc: &Precomputed, bm: &BuiltModel, seed: u64) -> Expression {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut expr = Expression::from(0.0);
    for s in students {
        for i in 0..pc.seats.len() {
            if let Some(&v) = bm.x[&s.name].get(&i) {
                let w: f64 = rng.gen_range(0.001..1.0);
                expr = expr + w * v;
            }
        }
    }
    expr
}

/// Runs up to four lexicographic passes, rebuilding a fresh model each
/// time and freezing prior optima via equality constraints. Returns the
/// pass-3 assignment, overridden by pass 4's if that optional pass
/// produces one.
pub(crate) fn run(
    pc: &Precomputed,
    students_in_order: &[Student],
    constraints: &[ConstraintKind],
    options: &SolveOptions,
    seed: Option<u64>,
) -> Result<(Assignment, Objectives), SolveError> {
    let both = options.prefer_alone && options.prefer_mixage;
    let mut num_passes: u64 = 2; // pass 1 and pass 3 always run
    if both {
        num_passes += 1;
    }
    if options.tiebreak_random {
        num_passes += 1;
    }
    let per_pass_budget_ms = options.time_budget_ms / num_passes;
    tracing::info!(num_passes, per_pass_budget_ms, "lexicographic driver starting");

    let mut frozen = Frozen::default();
    let num_workers = options.num_workers;

    let pass1 = run_pass(
        "pass1",
        students_in_order,
        pc,
        constraints,
        &frozen,
        per_pass_budget_ms,
        num_workers,
        seed,
        |bm| {
            if options.prefer_alone {
                (model::nb_isolated_expr(bm), Direction::Maximize)
            } else if options.prefer_mixage {
                (model::nb_same_expr(bm), Direction::Minimize)
            } else {
                (model::sum_y_expr(pc, students_in_order, bm), Direction::Minimize)
            }
        },
    )?;

    if options.prefer_alone {
        frozen.nb_isolated = Some(pass1.nb_isolated);
    } else if options.prefer_mixage {
        frozen.nb_same = Some(pass1.nb_same);
    }
    let mut current = pass1;

    if both {
        let pass2 = run_pass(
            "pass2",
            students_in_order,
            pc,
            constraints,
            &frozen,
            per_pass_budget_ms,
            num_workers,
            seed,
            |bm| (model::nb_same_expr(bm), Direction::Minimize),
        )?;
        frozen.nb_same = Some(pass2.nb_same);
        current = pass2;
    }

    let pass3 = run_pass(
        "pass3",
        students_in_order,
        pc,
        constraints,
        &frozen,
        per_pass_budget_ms,
        num_workers,
        seed,
        |bm| (model::sum_y_expr(pc, students_in_order, bm), Direction::Minimize),
    )?;
    frozen.sum_y = Some(pass3.sum_y);
    current = pass3;

    if options.tiebreak_random {
        let tiebreak_seed = seed.unwrap_or(0);
        match run_pass(
            "pass4",
            students_in_order,
            pc,
            constraints,
            &frozen,
            per_pass_budget_ms,
            num_workers,
            seed,
            |bm| {
                (
                    random_weighted_objective(students_in_order, pc, bm, tiebreak_seed),
                    Direction::Maximize,
                )
            },
        ) {
            Ok(pass4) => current = pass4,
            Err(e) => {
                tracing::debug!(error = %e, "optional random-tiebreak pass skipped, keeping pass-3 result");
            }
        }
    }

    let objectives = Objectives {
        nb_isolated: current.nb_isolated.round() as u32,
        nb_same: current.nb_same.round() as u32,
        sum_y: current.sum_y.round() as u64,
    };
    Ok((current.assignment, objectives))
}
