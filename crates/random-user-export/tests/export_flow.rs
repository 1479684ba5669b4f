//! End-to-end tests driving prompts, the HTTP client, validation and CSV
//! output against a mock random-user API.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use camino::Utf8PathBuf;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use random_user_export::{
    CSV_HEADER, Destination, NationalityVerdict, PipelineError, Prompter, RandomUserClient,
    RunOutcome, collect_request, export_users,
};
use rstest::{fixture, rstest};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Clock pinned to mid-morning UTC on 2024-06-15.
struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

/// Four users from four nationalities, 25% each.
const FOUR_NATIONALITIES: &str = r#"{
    "results": [
        {
            "gender": "male",
            "name": {"title": "Mr", "first": "Noah", "last": "Roy"},
            "email": "noah.roy@example.com",
            "login": {"username": "tinybird12"},
            "dob": {"date": "1990-01-10T12:00:00.000Z", "age": 34},
            "nat": "CA"
        },
        {
            "gender": "female",
            "name": {"title": "Ms", "first": "Aino", "last": "Koski"},
            "email": "aino.koski@example.com",
            "login": {"username": "redswan88"},
            "dob": {"date": "1985-12-24T12:00:00.000Z", "age": 38},
            "nat": "fi"
        },
        {
            "gender": "Female",
            "name": {"title": "Mrs", "first": "Lucia", "last": "Prieto"},
            "email": "lucia.prieto@example.com",
            "login": {"username": "lazyleopard"},
            "dob": {"date": "2000-03-01T12:00:00.000Z", "age": 24},
            "nat": "ES"
        },
        {
            "gender": null,
            "name": {"title": "Mx", "first": "Kai", "last": "Wagner"},
            "email": "kai.wagner@example.com",
            "login": {"username": "greenpanda"},
            "dob": {"date": "1972-09-30T12:00:00.000Z", "age": 51},
            "nat": "DE"
        }
    ],
    "info": {"seed": "abc", "results": 4, "page": 1, "version": "1.4"}
}"#;

/// Two users sharing one nationality.
const SINGLE_NATIONALITY: &str = r#"{
    "results": [
        {
            "gender": "male",
            "name": {"first": "Liam", "last": "Smith"},
            "email": "liam.smith@example.com",
            "login": {"username": "bigfish"},
            "dob": {"date": "1990-05-05T12:00:00.000Z"},
            "nat": "AU"
        },
        {
            "gender": "female",
            "name": {"first": "Mia", "last": "Brown"},
            "email": "mia.brown@example.com",
            "login": {"username": "smallcat"},
            "dob": {"date": "1992-07-07T12:00:00.000Z"},
            "nat": "au"
        }
    ]
}"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn destination(&self) -> Destination {
        let directory = Utf8PathBuf::from_path_buf(self.dir.path().to_path_buf())
            .expect("temp dir is UTF-8");
        Destination::new(directory, "Dunford_Curtis_users.csv").expect("valid destination")
    }

    fn read_csv(&self) -> String {
        std::fs::read_to_string(self.destination().path()).expect("CSV file exists")
    }

    fn csv_exists(&self) -> bool {
        self.destination().path().exists()
    }
}

#[fixture]
fn workspace() -> Workspace {
    Workspace {
        dir: TempDir::new().expect("create temp dir"),
    }
}

async fn mock_api(count: &str, seed: &str, inc: &str, response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .and(query_param("results", count))
        .and(query_param("seed", seed))
        .and(query_param("inc", inc))
        .respond_with(response)
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn run_session(
    answers: &str,
    server: &MockServer,
    workspace: &Workspace,
) -> Result<RunOutcome, PipelineError> {
    let mut prompter = Prompter::new(answers.as_bytes(), Vec::new());
    let request = collect_request(&mut prompter).expect("answers collected");
    let client = RandomUserClient::new(&server.uri()).expect("mock server URI is valid");
    let mut rng = ChaCha8Rng::seed_from_u64(2024);

    export_users(
        &request,
        &client,
        &FixtureClock,
        &mut rng,
        &workspace.destination(),
    )
    .await
}

#[rstest]
#[tokio::test]
async fn four_even_nationalities_produce_header_and_four_rows(workspace: Workspace) {
    let server = mock_api(
        "4",
        "abc",
        "",
        ResponseTemplate::new(200).set_body_string(FOUR_NATIONALITIES),
    )
    .await;

    let outcome = run_session("4\nabc\nno\n", &server, &workspace).await;

    assert_eq!(
        outcome,
        Ok(RunOutcome::Written {
            destination: workspace.destination(),
            rows: 4,
        })
    );

    let csv = workspace.read_csv();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines.first().copied(), Some(CSV_HEADER));

    let rows: Vec<Vec<&str>> = lines
        .iter()
        .skip(1)
        .map(|line| line.split(',').collect())
        .collect();
    let derived: Vec<Vec<&str>> = rows
        .iter()
        .map(|columns| columns.iter().skip(1).copied().collect())
        .collect();
    assert_eq!(
        derived,
        vec![
            vec!["Noah", "Roy", "0", "noah.roy@example.com", "tinybird12", "1990/01/10", "34"],
            vec!["Aino", "Koski", "1", "aino.koski@example.com", "redswan88", "1985/12/24", "38"],
            vec!["Lucia", "Prieto", "1", "lucia.prieto@example.com", "lazyleopard", "2000/03/01", "24"],
            vec!["Kai", "Wagner", "2", "kai.wagner@example.com", "greenpanda", "1972/09/30", "51"],
        ]
    );

    for columns in &rows {
        let id: u32 = columns
            .first()
            .expect("ID column")
            .parse()
            .expect("ID is numeric");
        assert!((1_000_000..100_000_000).contains(&id));
    }
}

#[rstest]
#[tokio::test]
async fn selected_parameters_are_sent_as_inclusion_list(workspace: Workspace) {
    let server = mock_api(
        "4",
        "xyz",
        "name,nat,dob,login,email,gender",
        ResponseTemplate::new(200).set_body_string(FOUR_NATIONALITIES),
    )
    .await;
    let answers = "4\nxyz\nyes\nname\nyes\nnat\nyes\ndob\nyes\nlogin\nyes\nemail\nyes\ngender\nno\n";

    let outcome = run_session(answers, &server, &workspace).await;

    assert!(matches!(outcome, Ok(RunOutcome::Written { rows: 4, .. })));
}

#[rstest]
#[tokio::test]
async fn dominant_nationality_skips_the_file(workspace: Workspace) {
    let server = mock_api(
        "2",
        "abc",
        "",
        ResponseTemplate::new(200).set_body_string(SINGLE_NATIONALITY),
    )
    .await;

    let outcome = run_session("2\nabc\nno\n", &server, &workspace).await;

    assert_eq!(
        outcome,
        Ok(RunOutcome::NationalityRejected(
            NationalityVerdict::DominantNationality {
                code: "au".to_owned(),
                count: 2,
                total: 2,
            }
        ))
    );
    assert!(!workspace.csv_exists());
}

#[rstest]
#[tokio::test]
async fn empty_results_skip_the_file(workspace: Workspace) {
    let server = mock_api(
        "3",
        "abc",
        "",
        ResponseTemplate::new(200).set_body_string(r#"{"results": [], "info": {}}"#),
    )
    .await;

    let outcome = run_session("3\nabc\nno\n", &server, &workspace).await;

    assert_eq!(outcome, Ok(RunOutcome::NoResults));
    assert!(!workspace.csv_exists());
}

#[rstest]
#[tokio::test]
async fn server_errors_are_reported_as_request_errors(workspace: Workspace) {
    let server = mock_api(
        "3",
        "abc",
        "",
        ResponseTemplate::new(500).set_body_string("upstream exploded"),
    )
    .await;

    let outcome = run_session("3\nabc\nno\n", &server, &workspace).await;

    let error = outcome.expect_err("500 must fail");
    assert_eq!(
        error.report_line().as_deref(),
        Some("Request error: response status code does not indicate success: 500: upstream exploded")
    );
    assert!(!workspace.csv_exists());
}

#[rstest]
#[tokio::test]
async fn malformed_bodies_are_reported_as_deserialization_errors(workspace: Workspace) {
    let server = mock_api(
        "3",
        "abc",
        "",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let outcome = run_session("3\nabc\nno\n", &server, &workspace).await;

    let error = outcome.expect_err("HTML must fail");
    let line = error.report_line().expect("decoding failures are reported");
    assert!(line.starts_with("JSON deserialization error: "));
    assert!(!workspace.csv_exists());
}
