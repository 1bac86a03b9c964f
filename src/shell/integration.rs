//! Functions that emit data for the wrapping shell function.

const OPEN_PREFIX: &str = "__SS_OPEN__=";

/// Emit the machine-readable exit payload for shell wrappers.
pub fn print_exit_payload(open_url: Option<&str>) {
    if let Some(url) = open_url {
        println!("{OPEN_PREFIX}{url}");
    }
}

/// Returns the bash function that users should add to their `.bashrc`.
///
/// The function name is `shelf` and it invokes the binary by its package
/// name (read from `Cargo.toml` at compile time).  A clicked product's
/// URL is opened in the default browser; relative URLs are just printed.
pub fn bash_function() -> String {
    let bin = env!("CARGO_PKG_NAME");
    format!(
        r#"
# ── {bin}: 3D product ring for the terminal ────────────────
# Browse with `shelf`.  Clicking a card opens its product page after
# the TUI exits.
shelf() {{
    local output
    output="$(command {bin} "$@")"
    local exit_code=$?
    local url=""
    while IFS= read -r line; do
        case "$line" in
            {OPEN_PREFIX}*) url="${{line#{OPEN_PREFIX}}}" ;;
        esac
    done <<< "$output"
    if [ $exit_code -eq 0 ] && [ -n "$url" ]; then
        case "$url" in
            http://*|https://*)
                if command -v xdg-open >/dev/null 2>&1; then
                    xdg-open "$url" >/dev/null 2>&1 &
                elif command -v open >/dev/null 2>&1; then
                    open "$url"
                else
                    printf '%s\n' "$url"
                fi
                ;;
            *) printf '%s\n' "$url" ;;
        esac
    fi
}}
"#
    )
}

/// Returns the zsh function that users should add to their `.zshrc`.
pub fn zsh_function() -> String {
    let bin = env!("CARGO_PKG_NAME");
    format!(
        r#"
# ── {bin}: 3D product ring for the terminal ────────────────
# Browse with `shelf`.  Clicking a card opens its product page after
# the TUI exits.
shelf() {{
    local output
    output="$(command {bin} "$@")"
    local exit_code=$?
    local url=""
    while IFS= read -r line; do
        case "$line" in
            {OPEN_PREFIX}*) url="${{line#{OPEN_PREFIX}}}" ;;
        esac
    done <<< "$output"
    if [[ $exit_code -eq 0 ]] && [[ -n "$url" ]]; then
        case "$url" in
            http://*|https://*)
                if command -v xdg-open >/dev/null 2>&1; then
                    xdg-open "$url" >/dev/null 2>&1 &
                elif command -v open >/dev/null 2>&1; then
                    open "$url"
                else
                    printf '%s\n' "$url"
                fi
                ;;
            *) printf '%s\n' "$url" ;;
        esac
    fi
}}
"#
    )
}

// ───────────────────────────────────────── tests ─────────────
