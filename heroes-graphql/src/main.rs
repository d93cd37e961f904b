//! Main entry point for CLI command to start server.

fn main() -> anyhow::Result<()> {
    heroes_graphql::main()
}
