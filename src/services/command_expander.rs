//! Expansion of a template into an argument vector for one cluster.

use crate::domain::errors::ExpansionError;
use crate::domain::models::{ArgumentVector, ClusterId, CommandTemplate, PLACEHOLDER};

/// Substitute `cluster` for the first placeholder and split on whitespace.
///
/// There is no quoting: a cluster identifier containing whitespace becomes
/// several tokens. Fails when fewer than two tokens remain.
pub fn expand(
    template: &CommandTemplate,
    cluster: &ClusterId,
) -> Result<ArgumentVector, ExpansionError> {
    let expanded = substitute(template, cluster);
    let tokens: Vec<String> = expanded.split_whitespace().map(str::to_string).collect();

    ArgumentVector::from_tokens(tokens).ok_or_else(|| ExpansionError::InsufficientArguments {
        cluster: cluster.to_string(),
        expanded,
    })
}

/// The template text with the first placeholder replaced.
pub fn substitute(template: &CommandTemplate, cluster: &ClusterId) -> String {
    template.as_str().replacen(PLACEHOLDER, cluster.as_str(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tokens(argv: &ArgumentVector) -> Vec<&str> {
        argv.tokens().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_expand_simple() {
        let argv = expand(&"echo %s".into(), &"a".into()).unwrap();
        assert_eq!(tokens(&argv), vec!["echo", "a"]);
    }

    #[test]
    fn test_expand_collapses_whitespace() {
        let argv = expand(&"kubectl  --context   %s\tget pods ".into(), &"prod".into()).unwrap();
        assert_eq!(tokens(&argv), vec!["kubectl", "--context", "prod", "get", "pods"]);
    }

    #[test]
    fn test_expand_placeholder_inside_token() {
        let argv = expand(&"kubectl --context=%s get ns".into(), &"prod".into()).unwrap();
        assert_eq!(tokens(&argv), vec!["kubectl", "--context=prod", "get", "ns"]);
    }

    #[test]
    fn test_expand_empty_cluster_is_insufficient() {
        let err = expand(&"echo %s".into(), &"".into()).unwrap_err();
        assert_eq!(
            err,
            ExpansionError::InsufficientArguments {
                cluster: String::new(),
                expanded: "echo ".to_string(),
            }
        );
    }

    #[test]
    fn test_expand_cluster_with_whitespace_splits() {
        let argv = expand(&"echo %s".into(), &"two words".into()).unwrap();
        assert_eq!(tokens(&argv), vec!["echo", "two", "words"]);
    }

    #[test]
    fn test_expand_only_first_placeholder() {
        let argv = expand(&"echo %s %s".into(), &"a".into()).unwrap();
        assert_eq!(tokens(&argv), vec!["echo", "a", "%s"]);
    }

    #[test]
    fn test_expand_leading_whitespace_placeholder() {
        let argv = expand(&" %s get".into(), &"kubectl".into()).unwrap();
        assert_eq!(argv.program(), "kubectl");
    }

    proptest! {
        #[test]
        fn prop_expansion_is_program_then_cluster(
            program in "[a-z]{1,8}",
            cluster in "[a-z0-9-]{1,16}",
        ) {
            let template = CommandTemplate::new(format!("{program} %s"));
            let argv = expand(&template, &ClusterId::new(cluster.clone())).unwrap();
            prop_assert_eq!(argv.program(), program.as_str());
            prop_assert_eq!(argv.args(), &[cluster][..]);
        }
    }
}
