use helm_publish_core::{
    ActionConfig, ActionInputs, CommitIdentity, DeployTarget, Error, GithubContext, Trigger,
};
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::path::Path;

fn inputs(token: Option<&str>, branch: Option<&str>) -> ActionInputs {
    ActionInputs {
        access_token: token.map(|t| SecretString::from(t.to_owned())),
        deploy_branch: branch.map(str::to_owned),
        charts_folder: Some("charts".into()),
    }
}

fn context(vars: &[(&str, &str)]) -> GithubContext {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    GithubContext::from_lookup(|key| map.get(key).cloned())
}

// ── Inputs ──

#[test]
fn missing_token_is_config_error() {
    let err = ActionConfig::from_inputs(inputs(None, None)).unwrap_err();
    assert!(matches!(err, Error::MissingAccessToken));
    assert!(err.to_string().contains("access-token"));
}

#[test]
fn blank_token_is_config_error() {
    let err = ActionConfig::from_inputs(inputs(Some("   "), None)).unwrap_err();
    assert!(matches!(err, Error::MissingAccessToken));
}

#[test]
fn deploy_branch_defaults_to_master() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), None)).unwrap();
    assert_eq!(config.deploy_branch, "master");

    let config = ActionConfig::from_inputs(inputs(Some("tok"), Some(""))).unwrap();
    assert_eq!(config.deploy_branch, "master");
}

#[test]
fn deploy_branch_is_taken_from_input() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), Some("gh-pages"))).unwrap();
    assert_eq!(config.deploy_branch, "gh-pages");
    assert_eq!(config.deploy_ref(), "refs/heads/gh-pages");
    assert_eq!(config.charts_folder, Path::new("charts"));
}

#[test]
fn charts_folder_defaults_to_charts() {
    let mut raw = inputs(Some("tok"), None);
    raw.charts_folder = None;
    let config = ActionConfig::from_inputs(raw).unwrap();
    assert_eq!(config.charts_folder, Path::new("charts"));

    let mut raw = inputs(Some("tok"), None);
    raw.charts_folder = Some("".into());
    let config = ActionConfig::from_inputs(raw).unwrap();
    assert_eq!(config.charts_folder, Path::new("charts"));
}

#[test]
fn server_url_defaults_to_github() {
    let ctx = context(&[("GITHUB_SERVER_URL", "  ")]);
    assert_eq!(ctx.server_url, "https://github.com");

    let ctx = context(&[("GITHUB_SERVER_URL", "https://ghe.example.com")]);
    assert_eq!(ctx.server_url, "https://ghe.example.com");
}

#[test]
fn debug_output_hides_token() {
    let config = ActionConfig::from_inputs(inputs(Some("ghp_supersecret"), None)).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("ghp_supersecret"));
    assert!(debug.contains("[REDACTED]"));
}

// ── Trigger guard ──

#[test]
fn push_to_deploy_branch_is_guarded() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), Some("gh-pages"))).unwrap();
    let ctx = context(&[("GITHUB_REF", "refs/heads/gh-pages")]);

    let trigger = Trigger::of(&config, &ctx);
    assert!(trigger.is_deploy_branch());
    assert_eq!(
        trigger,
        Trigger::DeployBranch("refs/heads/gh-pages".to_owned())
    );
}

#[test]
fn push_to_other_branch_deploys() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), Some("gh-pages"))).unwrap();
    let ctx = context(&[("GITHUB_REF", "refs/heads/main")]);
    assert_eq!(Trigger::of(&config, &ctx), Trigger::Source);
}

#[test]
fn branch_name_prefix_does_not_match() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), Some("gh"))).unwrap();
    let ctx = context(&[("GITHUB_REF", "refs/heads/gh-pages")]);
    assert!(!Trigger::of(&config, &ctx).is_deploy_branch());
}

#[test]
fn missing_ref_deploys() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), None)).unwrap();
    assert_eq!(Trigger::of(&config, &context(&[])), Trigger::Source);
}

// ── Deploy target ──

#[test]
fn remote_url_embeds_token() {
    let config = ActionConfig::from_inputs(inputs(Some("tok123"), Some("gh-pages"))).unwrap();
    let ctx = context(&[("GITHUB_REPOSITORY", "acme/charts")]);

    let target = DeployTarget::new(&config, &ctx).unwrap();

    assert_eq!(target.repository, "acme/charts");
    assert_eq!(target.branch, "gh-pages");
    assert_eq!(
        target.remote_url().expose_secret(),
        "https://tok123@github.com/acme/charts.git"
    );
}

#[test]
fn remote_url_follows_server_url() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), None)).unwrap();
    let ctx = context(&[
        ("GITHUB_REPOSITORY", "acme/charts"),
        ("GITHUB_SERVER_URL", "https://ghe.example.com/"),
    ]);

    let target = DeployTarget::new(&config, &ctx).unwrap();
    assert_eq!(
        target.remote_url().expose_secret(),
        "https://tok@ghe.example.com/acme/charts.git"
    );
}

#[test]
fn missing_repository_is_reported() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), None)).unwrap();
    let err = DeployTarget::new(&config, &context(&[])).unwrap_err();
    assert!(matches!(err, Error::MissingEnvVar("GITHUB_REPOSITORY")));
}

#[test]
fn malformed_repository_is_rejected() {
    let config = ActionConfig::from_inputs(inputs(Some("tok"), None)).unwrap();
    for bad in ["charts", "/charts", "acme/", "a/b/c"] {
        let err = DeployTarget::new(&config, &context(&[("GITHUB_REPOSITORY", bad)])).unwrap_err();
        assert!(matches!(err, Error::InvalidRepository { .. }), "{bad}");
    }
}

#[test]
fn redact_masks_token() {
    let config = ActionConfig::from_inputs(inputs(Some("tok123"), None)).unwrap();
    let target =
        DeployTarget::new(&config, &context(&[("GITHUB_REPOSITORY", "acme/charts")])).unwrap();

    let redacted = target.redact("fatal: could not read https://tok123@github.com/acme/charts.git");
    assert_eq!(
        redacted,
        "fatal: could not read https://***@github.com/acme/charts.git"
    );
    assert!(!format!("{target:?}").contains("tok123"));
}

// ── Context ──

#[test]
fn context_reads_runner_variables() {
    let ctx = context(&[
        ("GITHUB_REF", "refs/heads/main"),
        ("GITHUB_SHA", "abc"),
        ("GITHUB_ACTOR", "octocat"),
        ("GITHUB_REPOSITORY", "acme/charts"),
    ]);

    assert_eq!(ctx.git_ref.as_deref(), Some("refs/heads/main"));
    assert_eq!(ctx.sha().unwrap(), "abc");
    assert_eq!(ctx.actor().unwrap(), "octocat");
    assert_eq!(ctx.server_url, "https://github.com");
}

#[test]
fn context_treats_blank_as_missing() {
    let ctx = context(&[("GITHUB_SHA", ""), ("GITHUB_ACTOR", " ")]);
    assert!(matches!(ctx.sha(), Err(Error::MissingEnvVar("GITHUB_SHA"))));
    assert!(matches!(
        ctx.actor(),
        Err(Error::MissingEnvVar("GITHUB_ACTOR"))
    ));
}

#[test]
fn identity_uses_noreply_address() {
    let identity = CommitIdentity::for_actor("octocat");
    assert_eq!(identity.name, "octocat");
    assert_eq!(identity.email, "octocat@users.noreply.github.com");
}
