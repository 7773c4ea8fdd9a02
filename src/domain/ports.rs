/// Presentation and parsing settings shared by the CLI and the TOML file.
pub trait SettingsProvider {
    fn precision(&self) -> usize;
    fn currency_symbol(&self) -> &str;
    fn lenient_grades(&self) -> bool;
    fn coin_seed(&self) -> Option<u64>;
}
