//! Runs grid requests against an [`EmployeeApi`] and packages the results as
//! outcomes for [`GridController::apply`](crate::grid::GridController::apply).

use futures::future::join_all;
use tracing::{error, info};

use crate::{
    api::EmployeeApi,
    grid::{DeleteTarget, GridOutcome, GridRequest},
};

pub async fn execute(api: &dyn EmployeeApi, request: GridRequest) -> GridOutcome {
    let name = request.name();
    info!(request = name, "executing grid request");
    let outcome = match request {
        GridRequest::Load => GridOutcome::Loaded(api.list_employees().await),
        GridRequest::Create { rows, employees } => GridOutcome::Created {
            rows,
            result: api.create_employees(&employees).await,
        },
        GridRequest::Update { employees } => {
            GridOutcome::Updated(api.update_employees(&employees).await)
        }
        GridRequest::Delete(target) => {
            let result = match &target {
                DeleteTarget::One(id) => api.delete_employee(*id).await,
                DeleteTarget::Many(ids) => api.delete_employees(ids).await,
            };
            GridOutcome::Deleted { target, result }
        }
    };
    if let Some(err) = outcome_error(&outcome) {
        error!(request = name, "grid request failed: {err}");
    }
    outcome
}

/// Runs independent requests concurrently. Outcomes come back in request order.
pub async fn execute_all(api: &dyn EmployeeApi, requests: Vec<GridRequest>) -> Vec<GridOutcome> {
    join_all(requests.into_iter().map(|request| execute(api, request))).await
}

fn outcome_error(outcome: &GridOutcome) -> Option<&crate::error::ClientError> {
    match outcome {
        GridOutcome::Loaded(Err(err))
        | GridOutcome::Created {
            result: Err(err), ..
        }
        | GridOutcome::Updated(Err(err))
        | GridOutcome::Deleted {
            result: Err(err), ..
        } => Some(err),
        _ => None,
    }
}
