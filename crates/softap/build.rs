//! Renders `softap.1`, one page per visible subcommand (`softap-decode.1`
//! and so on) and shell completions into `OUT_DIR` for packaging.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs only depends on clap + clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
#[allow(dead_code)]
mod cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        return Err(io::Error::other("OUT_DIR is unset"));
    };
    let out_dir = Path::new(&out_dir);

    let cmd = cli::Cli::command();
    write_man_pages(cmd.clone(), &out_dir.join("man"))?;

    let completions = out_dir.join("completions");
    std::fs::create_dir_all(&completions)?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, &mut cmd.clone(), "softap", &completions)?;
    }
    Ok(())
}

fn write_man_pages(root: clap::Command, dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut pending = vec![root];
    while let Some(cmd) = pending.pop() {
        let page = cmd.get_name().to_owned();
        pending.extend(
            cmd.get_subcommands()
                .filter(|sub| !sub.is_hide_set())
                .map(|sub| sub.clone().name(format!("{page}-{}", sub.get_name()))),
        );

        let mut buf = Vec::new();
        clap_mangen::Man::new(cmd).render(&mut buf)?;
        std::fs::write(dir.join(format!("{page}.1")), buf)?;
    }
    Ok(())
}
