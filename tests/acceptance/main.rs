use cucumber::World;

#[derive(Debug, Default, World)]
pub struct FocusWorld {
    pub home: Option<tempfile::TempDir>,
    pub repo: Option<String>,
    pub captured_output: Vec<u8>,
    pub run_result: Option<Result<(), anyhow::Error>>,
}

#[tokio::main]
async fn main() {
    FocusWorld::run("features").await;
}

mod steps;
