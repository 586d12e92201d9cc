use clap::Parser;
use mdpreview::{Args, RunCmd};

#[derive(Parser, Debug)]
#[clap(name = "mdpreview", version)]
pub struct Mdpreview {
    #[clap(flatten)]
    pub args: Args,

    #[clap(subcommand)]
    pub cmd: RunCmd,
}

#[tokio::main]
async fn main() {
    let mdpreview = Mdpreview::parse();

    if let Err(e) = mdpreview.cmd.run(mdpreview.args).await {
        eprintln!("error: {e:?}");
        std::process::exit(1);
    }
}
