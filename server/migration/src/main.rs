#[tokio::main]
async fn main() {
    sea_orm_migration::cli::run_cli(shukatsu_migration::Migrator).await;
}
