use clap::{Arg, Command};

pub const ARG_SUPABASE_URL: &str = "supabase-url";
pub const ARG_SUPABASE_KEY: &str = "supabase-key";
pub const ARG_STORAGE_DIR: &str = "storage-dir";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_WHATSAPP_PHONE: &str = "whatsapp-phone";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SUPABASE_URL)
                .long("supabase-url")
                .help("Supabase project URL, example: https://<project>.supabase.co")
                .env("MEDICONNECT_SUPABASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SUPABASE_KEY)
                .long("supabase-key")
                .help("Supabase public anon key")
                .env("MEDICONNECT_SUPABASE_KEY")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_STORAGE_DIR)
                .long("storage-dir")
                .help("Directory holding saved drafts and the remembered email")
                .env("MEDICONNECT_STORAGE_DIR")
                .default_value(".mediconnect")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Backend request timeout in seconds")
                .env("MEDICONNECT_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..))
                .global(true),
        )
        .arg(
            Arg::new(ARG_WHATSAPP_PHONE)
                .long("whatsapp-phone")
                .help("WhatsApp number used for contact links")
                .env("MEDICONNECT_WHATSAPP_PHONE")
                .default_value("225XXXXXXXXX")
                .global(true),
        )
}
