//! Configuration command messages (install, list, show, delete)

pub struct ConfigMessages {
    // ============================================================================
    // Help
    // ============================================================================
    pub help: &'static str,
    pub install_usage: &'static str,
    pub show_usage: &'static str,
    pub delete_usage: &'static str,

    // ============================================================================
    // Results
    // ============================================================================
    pub installed: &'static str,
    pub none_found: &'static str,
    pub list_pid: &'static str,
    pub list_factory_pid: &'static str,
    pub list_alias_pid: &'static str,
    pub show_property: &'static str,
    pub not_found: &'static str,
    pub deleted: &'static str,
}

pub const CONFIG_MESSAGES: ConfigMessages = ConfigMessages {
    help: "---Configuration Admin---\n\tinstallConfig <url> - install a configuration properties file\n\tlistConfigs - list configurations\n\tshowConfig <pid> - show contents of specified configuration\n\tdeleteConfig <pid> - delete specified configuration",
    install_usage: "Usage: installConfig <url>",
    show_usage: "Usage: showConfig <pid>",
    delete_usage: "Usage: deleteConfig <pid>",

    installed: "Installed PID: {pid}",
    none_found: "No configurations found",
    list_pid: "PID: {pid}",
    list_factory_pid: ", Factory_PID: {factory_pid}",
    list_alias_pid: ", Alias_PID: {alias}",
    show_property: "\t{key}={value}",
    not_found: "No configurations matching PID {pid}",
    deleted: "Deleted configuration with PID = {pid}",
};
