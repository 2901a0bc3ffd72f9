use std::collections::{HashMap, HashSet};

use good_lp::{Expression, ProblemVariables, SolverModel, Variable};

use seating_core::domain::{Assignment, Gender, Student};
use seating_core::{ConstraintKind, Precomputed};

/// `x[student][seat index]`, one binary per student per seat actually in
/// that student's domain — seats outside `D(e)` simply have no variable,
/// which is how `x[e][i] = 0 if i ∉ D(e)` is realized.
pub(crate) type XVars = HashMap<String, HashMap<usize, Variable>>;

pub(crate) struct IsolationVars {
    pair_used: HashMap<(usize, usize), Variable>,
    has_neighbor: HashMap<usize, Variable>,
    iso: HashMap<usize, Variable>,
}

pub(crate) struct MixageVars {
    pair_f: HashMap<(usize, usize), Variable>,
    pair_m: HashMap<(usize, usize), Variable>,
}

/// Everything a single lexicographic pass needs: the variables and the
/// hard constraints that never change across passes, plus the two
/// objective-auxiliary blocks (isolation, mixage) built unconditionally
/// so freeze constraints from an earlier pass can always reference them.
pub(crate) struct BuiltModel {
    pub x: XVars,
    pub occ: Vec<Variable>,
    pub isolation: IsolationVars,
    pub mixage: MixageVars,
}

fn table_seats(pc: &Precomputed, x: u32, y: u32) -> Vec<usize> {
    pc.seats
        .iter()
        .enumerate()
        .filter(|(_, p)| p.x == x && p.y == y)
        .map(|(i, _)| i)
        .collect()
}

fn sum_of(vars: impl IntoIterator<Item = Variable>) -> Expression {
    vars.into_iter().fold(Expression::from(0.0), |acc, v| acc + v)
}

pub(crate) fn declare_x_vars(pc: &Precomputed, students: &[Student], vars: &mut ProblemVariables) -> XVars {
    let mut x: XVars = HashMap::new();
    for s in students {
        let domain = &pc.domains[&s.name];
        let mut per_seat = HashMap::new();
        for (i, &allowed) in domain.iter().enumerate() {
            if allowed {
                per_seat.insert(i, vars.add(good_lp::variable().binary()));
            }
        }
        x.insert(s.name.clone(), per_seat);
    }
    x
}

pub(crate) fn declare_occ_vars(pc: &Precomputed, vars: &mut ProblemVariables) -> Vec<Variable> {
    (0..pc.seats.len()).map(|_| vars.add(good_lp::variable().binary())).collect()
}

pub(crate) fn declare_isolation_vars(pc: &Precomputed, vars: &mut ProblemVariables) -> IsolationVars {
    let pair_used = pc
        .edges
        .iter()
        .map(|&(i, j)| ((i, j), vars.add(good_lp::variable().binary())))
        .collect();
    let has_neighbor = (0..pc.seats.len()).map(|i| (i, vars.add(good_lp::variable().binary()))).collect();
    let iso = (0..pc.seats.len()).map(|i| (i, vars.add(good_lp::variable().binary()))).collect();
    IsolationVars { pair_used, has_neighbor, iso }
}

pub(crate) fn declare_mixage_vars(pc: &Precomputed, vars: &mut ProblemVariables) -> MixageVars {
    let pair_f = pc
        .edges
        .iter()
        .map(|&(i, j)| ((i, j), vars.add(good_lp::variable().binary())))
        .collect();
    let pair_m = pc
        .edges
        .iter()
        .map(|&(i, j)| ((i, j), vars.add(good_lp::variable().binary())))
        .collect();
    MixageVars { pair_f, pair_m }
}

pub(crate) fn build(students: &[Student], pc: &Precomputed, vars: &mut ProblemVariables) -> BuiltModel {
    let x = declare_x_vars(pc, students, vars);
    let occ = declare_occ_vars(pc, vars);
    let isolation = declare_isolation_vars(pc, vars);
    let mixage = declare_mixage_vars(pc, vars);
    BuiltModel { x, occ, isolation, mixage }
}

/// Each student occupies exactly one seat.
pub(crate) fn add_assignment_constraints<M: SolverModel>(mut model: M, students: &[Student], bm: &BuiltModel) -> M {
    for s in students {
        let sum = sum_of(bm.x[&s.name].values().copied());
        model = model.with(sum.eq(1.0));
    }
    model
}

/// Each seat is occupied at most once, and `occ[i]` tracks that count.
pub(crate) fn add_seat_exclusivity_and_occupancy<M: SolverModel>(
    mut model: M,
    pc: &Precomputed,
    students: &[Student],
    bm: &BuiltModel,
) -> M {
    for i in 0..pc.seats.len() {
        let occupants: Vec<Variable> = students.iter().filter_map(|s| bm.x[&s.name].get(&i).copied()).collect();
        let sum = sum_of(occupants);
        model = model.with(sum.clone().leq(1.0));
        model = model.with((sum - bm.occ[i]).eq(0.0));
    }
    model
}

/// `SameTable`, `FarApart` and `Adjacent` forbid specific seat pairs for
/// two named students. `SoloAtTable`, `NoAdjacentNeighbor` and
/// `EmptyNeighbor` are encoded with a big-M style implication on the
/// seats surrounding one named student.
pub(crate) fn add_binary_constraints<M: SolverModel>(
    mut model: M,
    pc: &Precomputed,
    students: &[Student],
    bm: &BuiltModel,
    constraints: &[ConstraintKind],
) -> M {
    let edge_set: HashSet<(usize, usize)> = pc.edges.iter().copied().collect();

    for c in constraints {
        match c {
            ConstraintKind::SameTable { a, b } => {
                for (i, pi) in pc.seats.iter().enumerate() {
                    for (j, pj) in pc.seats.iter().enumerate() {
                        if (pi.x, pi.y) == (pj.x, pj.y) {
                            continue;
                        }
                        if let (Some(&xi), Some(&xj)) = (bm.x[a].get(&i), bm.x[b].get(&j)) {
                            model = model.with((xi + xj).leq(1.0));
                        }
                    }
                }
            }
            ConstraintKind::FarApart { a, b, d, metric } => {
                for (i, &pi) in pc.seats.iter().enumerate() {
                    for (j, &pj) in pc.seats.iter().enumerate() {
                        if pc.distance(pi, pj, *metric) >= *d {
                            continue;
                        }
                        if let (Some(&xi), Some(&xj)) = (bm.x[a].get(&i), bm.x[b].get(&j)) {
                            model = model.with((xi + xj).leq(1.0));
                        }
                    }
                }
            }
            ConstraintKind::Adjacent { a, b } => {
                for i in 0..pc.seats.len() {
                    for j in 0..pc.seats.len() {
                        let key = if i < j { (i, j) } else { (j, i) };
                        if i != j && edge_set.contains(&key) {
                            continue;
                        }
                        if let (Some(&xi), Some(&xj)) = (bm.x[a].get(&i), bm.x[b].get(&j)) {
                            model = model.with((xi + xj).leq(1.0));
                        }
                    }
                }
            }
            ConstraintKind::SoloAtTable { student } => {
                for t in pc.room.tables() {
                    let seats_t = table_seats(pc, t.x, t.y);
                    let on_t = sum_of(seats_t.iter().filter_map(|i| bm.x[student].get(i).copied()));
                    let mut others_expr = Expression::from(0.0);
                    for s in students {
                        if &s.name == student {
                            continue;
                        }
                        for i in &seats_t {
                            if let Some(&v) = bm.x[&s.name].get(i) {
                                others_expr = others_expr + v;
                            }
                        }
                    }
                    let cap = t.capacity as f64;
                    model = model.with((others_expr + cap * on_t).leq(cap));
                }
            }
            ConstraintKind::NoAdjacentNeighbor { student } => {
                for i in 0..pc.seats.len() {
                    let Some(&xi) = bm.x[student].get(&i) else { continue };
                    let neighbors = pc.neighbors(i);
                    if neighbors.is_empty() {
                        continue;
                    }
                    let mut others_expr = Expression::from(0.0);
                    for s in students {
                        if &s.name == student {
                            continue;
                        }
                        for &j in &neighbors {
                            if let Some(&v) = bm.x[&s.name].get(&j) {
                                others_expr = others_expr + v;
                            }
                        }
                    }
                    let n = neighbors.len() as f64;
                    model = model.with((others_expr + n * xi).leq(n));
                }
            }
            ConstraintKind::EmptyNeighbor { student } => {
                for i in 0..pc.seats.len() {
                    let Some(&xi) = bm.x[student].get(&i) else { continue };
                    let neighbors = pc.neighbors(i);
                    if neighbors.is_empty() {
                        continue;
                    }
                    let occ_sum = sum_of(neighbors.iter().map(|&j| bm.occ[j]));
                    let n = neighbors.len() as f64;
                    model = model.with((xi + occ_sum).leq(n));
                }
                for t in pc.room.tables() {
                    let seats_t = table_seats(pc, t.x, t.y);
                    let on_t = sum_of(seats_t.iter().filter_map(|i| bm.x[student].get(i).copied()));
                    let occ_sum = sum_of(seats_t.iter().map(|&i| bm.occ[i]));
                    model = model.with((occ_sum + on_t).leq(t.capacity as f64));
                }
            }
            // FrontRows, BackRows, ExactSeat, ForbidTable and ForbidSeat are
            // absorbed into D(e) at precompute time and need no model term.
            _ => {}
        }
    }
    model
}

pub(crate) fn add_isolation_constraints<M: SolverModel>(mut model: M, pc: &Precomputed, bm: &BuiltModel) -> M {
    for (&(i, j), &p) in &bm.isolation.pair_used {
        model = model.with((p - bm.occ[i]).leq(0.0));
        model = model.with((p - bm.occ[j]).leq(0.0));
        model = model.with((p - bm.occ[i] - bm.occ[j]).geq(-1.0));
    }
    for i in 0..pc.seats.len() {
        let h = bm.isolation.has_neighbor[&i];
        let incident: Vec<Variable> = pc
            .neighbors(i)
            .into_iter()
            .map(|j| {
                let key = if i < j { (i, j) } else { (j, i) };
                bm.isolation.pair_used[&key]
            })
            .collect();
        for &p in &incident {
            model = model.with((h - p).geq(0.0));
        }
        model = model.with((h - sum_of(incident)).leq(0.0));

        let iso = bm.isolation.iso[&i];
        model = model.with((iso - bm.occ[i]).leq(0.0));
        model = model.with((iso + h).leq(1.0));
        model = model.with((iso - bm.occ[i] + h).geq(0.0));
    }
    model
}

fn occ_of_gender(students: &[Student], gender: Gender, x: &XVars, seat: usize) -> Expression {
    sum_of(
        students
            .iter()
            .filter(|s| s.gender == gender)
            .filter_map(|s| x[&s.name].get(&seat).copied()),
    )
}

pub(crate) fn add_mixage_constraints<M: SolverModel>(mut model: M, pc: &Precomputed, students: &[Student], bm: &BuiltModel) -> M {
    for &(i, j) in &pc.edges {
        let pf = bm.mixage.pair_f[&(i, j)];
        let occ_f_i = occ_of_gender(students, Gender::Feminine, &bm.x, i);
        let occ_f_j = occ_of_gender(students, Gender::Feminine, &bm.x, j);
        model = model.with((pf - occ_f_i.clone()).leq(0.0));
        model = model.with((pf - occ_f_j.clone()).leq(0.0));
        model = model.with((pf - occ_f_i - occ_f_j).geq(-1.0));

        let pm = bm.mixage.pair_m[&(i, j)];
        let occ_m_i = occ_of_gender(students, Gender::Masculine, &bm.x, i);
        let occ_m_j = occ_of_gender(students, Gender::Masculine, &bm.x, j);
        model = model.with((pm - occ_m_i.clone()).leq(0.0));
        model = model.with((pm - occ_m_j.clone()).leq(0.0));
        model = model.with((pm - occ_m_i - occ_m_j).geq(-1.0));
    }
    model
}

pub(crate) fn nb_isolated_expr(bm: &BuiltModel) -> Expression {
    sum_of(bm.isolation.iso.values().copied())
}

pub(crate) fn nb_same_expr(bm: &BuiltModel) -> Expression {
    sum_of(bm.mixage.pair_f.values().copied().chain(bm.mixage.pair_m.values().copied()))
}

/// `Σ y(i)·x[e][i]`, using pixel `y` instead of grid `y` once a pixel
/// geometry has been supplied and is therefore in effect.
pub(crate) fn sum_y_expr(pc: &Precomputed, students: &[Student], bm: &BuiltModel) -> Expression {
    let mut expr = Expression::from(0.0);
    for s in students {
        for (&i, &v) in &bm.x[&s.name] {
            let y = if pc.has_geometry() {
                pc.px(pc.seats[i]).1
            } else {
                pc.seats[i].y as f64
            };
            expr = expr + y * v;
        }
    }
    expr
}

pub(crate) fn extract_assignment(pc: &Precomputed, students: &[Student], bm: &BuiltModel, sol: &impl good_lp::Solution) -> Assignment {
    let mut assignment = Assignment::new();
    for s in students {
        for (&i, &v) in &bm.x[&s.name] {
            if sol.value(v) > 0.5 {
                assignment.insert(s.name.clone(), pc.seats[i]);
                break;
            }
        }
    }
    assignment
}
