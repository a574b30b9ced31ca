use leastcost_placement::CostRegistry;

pub fn list() -> anyhow::Result<()> {
    let registry = CostRegistry::with_builtins();
    for name in registry.names() {
        println!("{name}");
    }
    Ok(())
}
