use clap::Parser;

use forwarded_proto::protocol::{resolve_with_source, HeaderTable};

#[derive(Parser)]
#[command(name = "proto-probe")]
#[command(about = "Resolve a request's protocol from its headers, offline", long_about = None)]
struct Cli {
    /// The connection to this server is TLS-encrypted.
    #[arg(long)]
    encrypted: bool,

    /// Trust Forwarded / X-Forwarded-Proto from the peer.
    #[arg(long)]
    trust_proxy: bool,

    /// Request header, e.g. -H "Forwarded: for=10.0.0.1;proto=https"
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Also print which rule decided.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_header(arg: &str) -> Result<(String, String), String> {
    let (name, value) = arg
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {arg:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in {arg:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn main() {
    let cli = Cli::parse();
    let headers: HeaderTable = cli.headers.into_iter().collect();

    let (protocol, source) = resolve_with_source(cli.encrypted, cli.trust_proxy, &headers);
    if cli.verbose {
        println!("{protocol} (from {source})");
    } else {
        println!("{protocol}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_argument() {
        assert_eq!(
            parse_header("X-Forwarded-Proto:  https, http ").unwrap(),
            ("X-Forwarded-Proto".to_string(), "https, http".to_string())
        );
        assert_eq!(
            parse_header("x-forwarded-proto:").unwrap().1,
            ""
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": https").is_err());
    }

    #[test]
    fn cli_parses_repeated_headers() {
        let cli = Cli::try_parse_from([
            "proto-probe",
            "--trust-proxy",
            "-H",
            "Forwarded: for=127.0.0.1",
            "-H",
            "X-Forwarded-Proto: https, http",
        ])
        .unwrap();
        assert!(cli.trust_proxy);
        assert!(!cli.encrypted);
        assert_eq!(cli.headers.len(), 2);
    }
}
