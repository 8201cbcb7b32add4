use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata backing `roster-dash --version`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
