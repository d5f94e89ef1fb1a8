use podium_common::{Category, Gender};
use serde_json::json;

use crate::common::{TestApp, in_days, routes};

async fn contest_with_participant(app: &TestApp, end_in_days: i64) -> (i32, i32, i32) {
    let home = app.create_institute("North Campus").await;
    let contest = app
        .create_contest("Icon", Category::Open, home, in_days(end_in_days))
        .await;
    let participant = app.create_contestant("Asha", Gender::Female, home).await;
    app.approve_participant(contest, participant, 0).await;
    (home, contest, participant)
}

#[tokio::test]
async fn vote_counts_toward_the_participant() {
    let app = TestApp::spawn().await;
    let (home, contest, participant) = contest_with_participant(&app, 3).await;
    let voter = app.create_user("Voter", Gender::Male, Some(home), None).await;
    let token = app.token_for(voter, &[]);

    let res = app
        .post_with_token(
            &routes::votes(contest),
            &json!({"participant_id": participant}),
            &token,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["voter_id"], voter);
    assert_eq!(res.body["participant_id"], participant);

    let res = app.get_with_token(&routes::leaderboard(contest), &token).await;
    assert_eq!(res.body["entries"][0]["votes"], 1);

    let res = app.get_with_token(&routes::my_vote(contest), &token).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["vote"]["participant_id"], participant);
}

#[tokio::test]
async fn second_vote_is_rejected() {
    let app = TestApp::spawn().await;
    let (home, contest, participant) = contest_with_participant(&app, 3).await;
    let other = app.create_contestant("Ravi", Gender::Male, home).await;
    app.approve_participant(contest, other, 1).await;
    let voter = app.create_user("Voter", Gender::Male, Some(home), None).await;
    let token = app.token_for(voter, &[]);

    let first = app
        .post_with_token(
            &routes::votes(contest),
            &json!({"participant_id": participant}),
            &token,
        )
        .await;
    assert_eq!(first.status, 201, "{}", first.text);

    let res = app
        .post_with_token(&routes::votes(contest), &json!({"participant_id": other}), &token)
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "ALREADY_VOTED");

    let res = app.get_with_token(&routes::my_vote(contest), &token).await;
    assert_eq!(res.body["vote"]["participant_id"], participant);

    let res = app.get_with_token(&routes::leaderboard(contest), &token).await;
    let votes: Vec<i64> = res.body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["votes"].as_i64().unwrap())
        .collect();
    assert_eq!(votes, vec![1, 0]);
}

#[tokio::test]
async fn no_vote_reads_as_null() {
    let app = TestApp::spawn().await;
    let (home, contest, _) = contest_with_participant(&app, 3).await;
    let voter = app.create_user("Voter", Gender::Male, Some(home), None).await;

    let res = app
        .get_with_token(&routes::my_vote(contest), &app.token_for(voter, &[]))
        .await;
    assert_eq!(res.status, 200);
    assert!(res.body["vote"].is_null());
}

#[tokio::test]
async fn cannot_vote_for_someone_not_approved() {
    let app = TestApp::spawn().await;
    let (home, contest, _) = contest_with_participant(&app, 3).await;
    let stranger = app.create_contestant("Stranger", Gender::Male, home).await;
    let voter = app.create_user("Voter", Gender::Male, Some(home), None).await;

    let res = app
        .post_with_token(
            &routes::votes(contest),
            &json!({"participant_id": stranger}),
            &app.token_for(voter, &[]),
        )
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn voting_closes_at_the_end_date() {
    let app = TestApp::spawn().await;
    let (home, contest, participant) = contest_with_participant(&app, -1).await;
    let voter = app.create_user("Voter", Gender::Male, Some(home), None).await;

    let res = app
        .post_with_token(
            &routes::votes(contest),
            &json!({"participant_id": participant}),
            &app.token_for(voter, &[]),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn malformed_body_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let (home, contest, _) = contest_with_participant(&app, 3).await;
    let voter = app.create_user("Voter", Gender::Male, Some(home), None).await;

    let res = app
        .post_with_token(
            &routes::votes(contest),
            &json!({"participant": "nobody"}),
            &app.token_for(voter, &[]),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn participants_outside_the_category_do_not_count() {
    let app = TestApp::spawn().await;
    let home = app.create_institute("North Campus").await;
    let contest = app
        .create_contest("Mr Fresher", Category::Male, home, in_days(3))
        .await;
    let male = app.create_contestant("Ravi", Gender::Male, home).await;
    let female = app.create_contestant("Asha", Gender::Female, home).await;
    app.approve_participant(contest, male, 0).await;
    app.approve_participant(contest, female, 1).await;
    let voter = app.create_user("Voter", Gender::Female, Some(home), None).await;
    let token = app.token_for(voter, &[]);

    let res = app.get_with_token(&routes::leaderboard(contest), &token).await;
    assert_eq!(res.status, 200, "{}", res.text);
    let ids: Vec<i64> = res.body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["participant"]["user_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![male as i64]);

    let res = app
        .post_with_token(&routes::votes(contest), &json!({"participant_id": female}), &token)
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");

    let res = app
        .post_with_token(&routes::votes(contest), &json!({"participant_id": male}), &token)
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app
        .post_with_token(&routes::votes(contest), &json!({"participant_id": male}), &token)
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "ALREADY_VOTED");
}
