use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
pub struct ArgsPlayground {
    /// Window width in pixels
    #[arg(long, default_value_t = 1280)]
    pub width: u32,
    /// Window height in pixels
    #[arg(long, default_value_t = 720)]
    pub height: u32,
    /// Window title
    #[arg(long, default_value = "OpenGL Playground")]
    pub title: String,
    /// Image mapped onto the quad
    #[arg(long, default_value = "assets/paper.png")]
    pub texture: PathBuf,
    /// Present frames as fast as possible
    #[arg(long)]
    pub no_vsync: bool,
    /// Log filter in env_logger syntax, overrides RUST_LOG
    #[arg(long)]
    pub log: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_test() {
        let args = ArgsPlayground::try_parse_from(["playground"]).unwrap();

        assert_eq!(args.width, 1280);
        assert_eq!(args.height, 720);
        assert_eq!(args.title, "OpenGL Playground");
        assert_eq!(args.texture, PathBuf::from("assets/paper.png"));
        assert!(!args.no_vsync);
        assert_eq!(args.log, None);
    }

    #[test]
    fn override_test() {
        let args = ArgsPlayground::try_parse_from([
            "playground",
            "--width",
            "640",
            "--title",
            "T",
            "--no-vsync",
            "--log",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.width, 640);
        assert_eq!(args.height, 720);
        assert_eq!(args.title, "T");
        assert!(args.no_vsync);
        assert_eq!(args.log.as_deref(), Some("debug"));
    }

    #[test]
    fn invalid_size_test() {
        assert!(ArgsPlayground::try_parse_from(["playground", "--width", "-3"]).is_err());
    }
}
