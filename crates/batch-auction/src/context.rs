//! Validation of a settled auction against the auction it settles.

use {
    crate::{
        auction::{BatchAuction, Order},
        checks,
        error::{Error, Path},
        report::{Check, Report, Warning},
        solution::{ExecutedOrder, SettledBatchAuction},
    },
    std::collections::HashSet,
};

/// Checks `solution` against its originating `problem`: token references
/// resolve in the problem's token table, executed entities exist in the
/// problem and executed amounts stay within the declared bounds.
pub fn validate_against(
    solution: &SettledBatchAuction,
    problem: &BatchAuction,
) -> Result<Report, Error> {
    checks::solution_references(solution, &problem.tokens)?;

    let root = Path::root();
    for (id, executed) in &solution.orders {
        let path = root.join("orders").join(id);
        let declared = problem
            .orders
            .get(id)
            .ok_or_else(|| Error::UnknownEntityReference {
                path: path.clone(),
                id: id.to_string(),
            })?;
        if !within_bounds(executed, declared) {
            return Err(Error::ExecutionBoundsViolation(path));
        }
    }

    for (id, amm) in &solution.amms {
        let declared = problem
            .amms
            .get(id)
            .ok_or_else(|| Error::UnknownEntityReference {
                path: root.join("amms").join(id),
                id: id.to_string(),
            })?;
        // Reserves of stable and concentrated pools are opaque.
        let Some(tokens) = declared.parameters.tokens() else {
            continue;
        };
        for (i, execution) in amm.execution.iter().flatten().enumerate() {
            if !tokens.contains(&&execution.sell_token) || !tokens.contains(&&execution.buy_token) {
                let path = root.join("amms").join(id).join("execution").join(i);
                return Err(Error::ExecutionBoundsViolation(path));
            }
        }
    }

    let mut positions = HashSet::new();
    for (path, _, execution) in solution.executions() {
        let Some(plan) = &execution.exec_plan else {
            continue;
        };
        if !positions.insert((plan.sequence, plan.position)) {
            return Err(Error::ExecutionBoundsViolation(path.join("exec_plan")));
        }
    }

    tracing::debug!(
        orders = solution.orders.len(),
        amms = solution.amms.len(),
        "solution is consistent with its auction"
    );
    Ok(Report::default())
}

/// Partially fillable orders may execute anything up to the declared
/// amounts. Other orders execute fully or not at all.
fn within_bounds(executed: &ExecutedOrder, declared: &Order) -> bool {
    let (sell, buy) = (&executed.exec_sell_amount, &executed.exec_buy_amount);
    if declared.allow_partial_fill {
        sell <= &declared.sell_amount && buy <= &declared.buy_amount
    } else {
        (sell == &declared.sell_amount && buy == &declared.buy_amount)
            || (sell.is_zero() && buy.is_zero())
    }
}

/// Runs the checks a solution supports on its own and records the ones that
/// need the originating auction.
pub(crate) fn standalone(solution: &SettledBatchAuction, report: &mut Report) -> Result<(), Error> {
    match &solution.tokens {
        Some(tokens) => checks::solution_references(solution, tokens)?,
        None => report.warn(Warning::ContextRequired(Check::TokenReferences)),
    }
    for check in [Check::ExecutionBounds, Check::ReserveMembership, Check::PlanPositions] {
        report.warn(Warning::ContextRequired(check));
    }
    Ok(())
}
