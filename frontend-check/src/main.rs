use frontend_check::{
    init_tracing, probe_generate_simulation, FrontendEndpoints, ProbeError, SimulationRequest,
    REQUEST_TIMEOUT,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let endpoints = FrontendEndpoints::from_env();
    let url = endpoints.generate_simulation_url();

    println!("{}", "=".repeat(60));
    println!("TESTING FRONTEND -> BACKEND INTEGRATION");
    println!("{}", "=".repeat(60));
    println!("\nSending POST request to: {}", url);
    println!("   (checks that the frontend forwards to the backend)");

    let request = SimulationRequest::default();
    match probe_generate_simulation(&endpoints, &request, REQUEST_TIMEOUT).await {
        Ok(outcome) => {
            println!(
                "\nResponse received in {:.2} seconds",
                outcome.elapsed.as_secs_f64()
            );
            println!("Status Code: {}", outcome.status);

            if outcome.is_success() {
                println!("\nSUCCESS! Frontend successfully talked to Backend.");
                println!(
                    "   Simulation ID: {}",
                    outcome.simulation_id.as_deref().unwrap_or("None")
                );
            } else {
                println!("\nFAILED. Status: {}", outcome.status);
                println!("Response: {}", outcome.body_excerpt);
                for tip in outcome.diagnostics(&endpoints) {
                    println!("   - {}", tip);
                }
            }
        }
        Err(ProbeError::Connect { url, .. }) => {
            println!("\nCOULD NOT CONNECT to {}", url);
            println!("   Make sure the frontend is running! (npm run dev)");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Probe failed");
            println!("\nFAILED: {}", e);
        }
    }

    Ok(())
}
