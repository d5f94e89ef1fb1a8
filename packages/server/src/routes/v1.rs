use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(profile_routes())
        .merge(contest_routes())
        .merge(participation_routes())
        .merge(vote_routes())
        .merge(session_routes())
}

fn profile_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(
        handlers::profile::get_me,
        handlers::profile::update_me
    ))
}

fn contest_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::contest::list_contests))
        .routes(routes!(handlers::contest::list_joinable_contests))
        .routes(routes!(handlers::contest::get_contest))
        .routes(routes!(handlers::contest::get_leaderboard))
        .routes(routes!(handlers::contest::get_winners))
}

fn participation_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::approval::request_participation))
        .routes(routes!(handlers::approval::list_approvals))
        .routes(routes!(handlers::approval::review_approval))
}

fn vote_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::vote::cast_vote))
        .routes(routes!(handlers::vote::get_my_vote))
}

fn session_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::session::get_selection,
            handlers::session::select_contest
        ))
        .routes(routes!(handlers::session::go_back))
        .routes(routes!(handlers::view::get_view))
}
