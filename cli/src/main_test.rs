use super::*;

#[test]
fn parse_fields_keeps_order_and_splits_on_first_equals() {
    let fields = vec!["LastName=Lovelace".to_owned(), "Notes=a=b".to_owned()];
    let map = parse_fields(&fields).expect("fields");

    let keys = map.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(keys, vec!["LastName", "Notes"]);
    assert_eq!(map.get("Notes"), Some(&Value::String("a=b".to_owned())));
}

#[test]
fn parse_fields_rejects_missing_separator_or_key() {
    assert!(matches!(parse_fields(&["novalue".to_owned()]), Err(CliError::InvalidField(_))));
    assert!(matches!(parse_fields(&["=x".to_owned()]), Err(CliError::InvalidField(_))));
}

#[test]
fn search_flags_left_off_are_dropped_from_the_wire() {
    let body = search_body(SearchArgs {
        query: "mondago".to_owned(),
        count: Some(5),
        offset: None,
        include_pictures: false,
        include_activities: true,
    });
    assert_eq!(
        integrator_api::form::encode(&body).expect("encode"),
        "query=mondago&count=5&includeActivities=true"
    );
}

#[test]
fn cli_parses_insecure_flag_and_control_action() {
    let cli = Cli::try_parse_from(["integrator", "--https", "false", "control", "send-dtmf", "call-1"])
        .expect("parse");
    assert!(!cli.https);
    assert!(matches!(cli.command, Command::Control { action: ControlAction::SendDtmf, ref call_id } if call_id == "call-1"));
}

#[test]
fn missing_certificate_file_names_the_path() {
    let err = read_certificate(Path::new("/nonexistent/integrator-ca.pem")).expect_err("missing file");
    assert!(matches!(&err, CliError::ReadCertificate { .. }));
    assert!(err.to_string().contains("/nonexistent/integrator-ca.pem"));
}

#[test]
fn route_subcommand_takes_name_get_flag_and_fields() {
    let cli = Cli::try_parse_from(["integrator", "--ca-cert", "/etc/integrator/ca.pem", "route", "Hold", "callId=c-1"])
        .expect("parse");
    assert_eq!(cli.ca_cert.as_deref(), Some(Path::new("/etc/integrator/ca.pem")));
    let Command::Route(args) = cli.command else {
        panic!("expected route subcommand");
    };
    assert_eq!(args.route, "Hold");
    assert!(!args.get);
    assert_eq!(args.fields, vec!["callId=c-1".to_owned()]);

    let cli = Cli::try_parse_from(["integrator", "route", "--get", "Version"]).expect("parse");
    assert!(matches!(cli.command, Command::Route(RouteArgs { get: true, .. })));
}
