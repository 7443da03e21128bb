use clap::Parser;
use rondo_examples::duel::model::{run, setup_logger};
use rondo_examples::duel::options::DuelOptions;

fn main() -> anyhow::Result<()>{
    let options = DuelOptions::parse();
    setup_logger(&options)?;
    run(options)
}
