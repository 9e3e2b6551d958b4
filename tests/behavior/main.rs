use libtest_mimic::Arguments;

mod operations;

pub use utils::*;

fn main() -> ctmu::error::Result<()> {
    let args = Arguments::from_args();

    let root = tempfile::tempdir()?;
    let clients = init_test_service(root.path())?;

    let mut tests = Vec::new();

    operations::upload::tests(&clients, &mut tests);
    operations::download::tests(&clients, &mut tests);
    operations::list::tests(&clients, &mut tests);
    operations::delete::tests(&clients, &mut tests);
    operations::mkdir::tests(&clients, &mut tests);
    operations::cli::tests(&mut tests);

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let conclusion = libtest_mimic::run(&args, tests);

    TEST_RUNTIME.block_on(TEST_FIXTURE.cleanup(&clients));
    drop(root);

    conclusion.exit()
}
