//! Effective-signature computation for (possibly partially bound) callables.

use std::fmt;

use crate::error::{Error, Result};

/// A callable's parameter spec: ordered names, optional variadic names, and
/// default values aligned to the tail of `names`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgSpec {
    pub names: Vec<String>,
    /// Name of the `*args`-style catch-all, if declared.
    pub varargs: Option<String>,
    /// Name of the `**kwargs`-style catch-all, if declared.
    pub varkw: Option<String>,
    /// Display forms of the trailing defaults; `defaults[i]` belongs to
    /// `names[names.len() - defaults.len() + i]`.
    pub defaults: Vec<String>,
}

/// One partial-application record: values pre-supplied positionally and by
/// keyword over the base callable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialBinding {
    pub args: Vec<String>,
    pub kwargs: Vec<(String, String)>,
}

/// Declared signature plus zero or more partial bindings, as reported by the
/// host reflection layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallableSignature {
    pub spec: ArgSpec,
    pub bindings: Vec<PartialBinding>,
}

/// Compute the signature visible to a caller of the partially-bound callable.
///
/// Bindings apply cumulatively in the order given; within one binding,
/// positional values first, then keyword values. Variadic names survive
/// binding untouched.
pub fn effective_spec(signature: &CallableSignature) -> Result<ArgSpec> {
    let mut spec = signature.spec.clone();
    for binding in &signature.bindings {
        bind_positional(&mut spec, binding.args.len())?;
        for (name, _) in &binding.kwargs {
            bind_keyword(&mut spec, name);
        }
    }
    Ok(spec)
}

/// Consume `count` parameter names from the front, keeping `defaults`
/// aligned to the tail of what remains.
pub(crate) fn bind_positional(spec: &mut ArgSpec, count: usize) -> Result<()> {
    if count > spec.names.len() {
        return Err(Error::OverBoundPositionals {
            declared: spec.names.len(),
            bound: count,
        });
    }
    let first_default = spec.names.len().saturating_sub(spec.defaults.len());
    let consumed_defaults = count.saturating_sub(first_default);
    spec.defaults.drain(..consumed_defaults);
    spec.names.drain(..count);
    Ok(())
}

/// Remove the named parameter wherever it occurs in the remaining list,
/// along with its default value if it had one. Unknown names are absorbed by
/// the keyword catch-all and change nothing.
fn bind_keyword(spec: &mut ArgSpec, name: &str) {
    let Some(pos) = spec.names.iter().position(|n| n == name) else {
        return;
    };
    let first_default = spec.names.len().saturating_sub(spec.defaults.len());
    if pos >= first_default {
        spec.defaults.remove(pos - first_default);
    }
    spec.names.remove(pos);
}

impl fmt::Display for ArgSpec {
    /// Caller-visible signature text, e.g. `(arg1, kwarg1=1, *args, **kwargs)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first_default = self.names.len().saturating_sub(self.defaults.len());
        let mut parts: Vec<String> = Vec::with_capacity(self.names.len() + 2);
        for (i, name) in self.names.iter().enumerate() {
            if i < first_default {
                parts.push(name.clone());
            } else {
                parts.push(format!("{}={}", name, self.defaults[i - first_default]));
            }
        }
        if let Some(ref varargs) = self.varargs {
            parts.push(format!("*{}", varargs));
        }
        if let Some(ref varkw) = self.varkw {
            parts.push(format!("**{}", varkw));
        }
        write!(f, "({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(names: &[&str], defaults: &[&str]) -> ArgSpec {
        ArgSpec {
            names: names.iter().map(|s| s.to_string()).collect(),
            varargs: None,
            varkw: None,
            defaults: defaults.iter().map(|s| s.to_string()).collect(),
        }
    }

    // (arg1, arg2, kwarg1=1, kwarg2=2)
    fn four_params() -> ArgSpec {
        spec(&["arg1", "arg2", "kwarg1", "kwarg2"], &["1", "2"])
    }

    fn positional(values: &[&str]) -> PartialBinding {
        PartialBinding {
            args: values.iter().map(|s| s.to_string()).collect(),
            kwargs: Vec::new(),
        }
    }

    fn keyword(pairs: &[(&str, &str)]) -> PartialBinding {
        PartialBinding {
            args: Vec::new(),
            kwargs: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn no_bindings_is_identity() {
        let sig = CallableSignature {
            spec: four_params(),
            bindings: Vec::new(),
        };
        assert_eq!(effective_spec(&sig).unwrap(), four_params());
    }

    #[test]
    fn empty_binding_is_identity() {
        let sig = CallableSignature {
            spec: four_params(),
            bindings: vec![PartialBinding::default()],
        };
        assert_eq!(effective_spec(&sig).unwrap(), four_params());
    }

    #[test]
    fn positional_binding_consumes_from_front() {
        let sig = CallableSignature {
            spec: four_params(),
            bindings: vec![positional(&["1"])],
        };
        assert_eq!(
            effective_spec(&sig).unwrap(),
            spec(&["arg2", "kwarg1", "kwarg2"], &["1", "2"])
        );
    }

    #[test]
    fn positional_binding_into_default_zone() {
        let sig = CallableSignature {
            spec: four_params(),
            bindings: vec![positional(&["1", "2", "3"])],
        };
        assert_eq!(effective_spec(&sig).unwrap(), spec(&["kwarg2"], &["2"]));
    }

    #[test]
    fn keyword_binding_removes_named_default() {
        let sig = CallableSignature {
            spec: four_params(),
            bindings: vec![keyword(&[("kwarg1", "0")])],
        };
        assert_eq!(
            effective_spec(&sig).unwrap(),
            spec(&["arg1", "arg2", "kwarg2"], &["2"])
        );

        let sig = CallableSignature {
            spec: four_params(),
            bindings: vec![keyword(&[("kwarg2", "0")])],
        };
        assert_eq!(
            effective_spec(&sig).unwrap(),
            spec(&["arg1", "arg2", "kwarg1"], &["1"])
        );
    }

    #[test]
    fn keyword_binding_of_plain_parameter() {
        let sig = CallableSignature {
            spec: four_params(),
            bindings: vec![keyword(&[("arg2", "0"), ("kwarg1", "0"), ("kwarg2", "0")])],
        };
        assert_eq!(effective_spec(&sig).unwrap(), spec(&["arg1"], &[]));
    }

    #[test]
    fn variadic_names_survive_binding() {
        let base = ArgSpec {
            names: vec!["arg1".into(), "arg2".into()],
            varargs: Some("my_args".into()),
            varkw: Some("my_kwargs".into()),
            defaults: Vec::new(),
        };
        let sig = CallableSignature {
            spec: base,
            bindings: vec![positional(&["0", "1"])],
        };
        let effective = effective_spec(&sig).unwrap();
        assert!(effective.names.is_empty());
        assert!(effective.defaults.is_empty());
        assert_eq!(effective.varargs.as_deref(), Some("my_args"));
        assert_eq!(effective.varkw.as_deref(), Some("my_kwargs"));
    }

    #[test]
    fn bindings_apply_cumulatively() {
        let sig = CallableSignature {
            spec: four_params(),
            bindings: vec![positional(&["1"]), keyword(&[("kwarg2", "0")])],
        };
        assert_eq!(
            effective_spec(&sig).unwrap(),
            spec(&["arg2", "kwarg1"], &["1"])
        );
    }

    #[test]
    fn over_binding_is_an_error() {
        let sig = CallableSignature {
            spec: spec(&["arg1"], &[]),
            bindings: vec![positional(&["1", "2"])],
        };
        assert_eq!(
            effective_spec(&sig),
            Err(Error::OverBoundPositionals {
                declared: 1,
                bound: 2
            })
        );
    }

    #[test]
    fn unknown_keyword_is_a_no_op() {
        let sig = CallableSignature {
            spec: four_params(),
            bindings: vec![keyword(&[("elsewhere", "0")])],
        };
        assert_eq!(effective_spec(&sig).unwrap(), four_params());
    }

    #[test]
    fn display_plain_and_defaults() {
        assert_eq!(
            four_params().to_string(),
            "(arg1, arg2, kwarg1=1, kwarg2=2)"
        );
        assert_eq!(
            spec(&["unused_arg", "unused_kwarg"], &["'default'"]).to_string(),
            "(unused_arg, unused_kwarg='default')"
        );
    }

    #[test]
    fn display_variadics() {
        let spec = ArgSpec {
            names: vec!["unused_arg".into()],
            varargs: Some("unused_args".into()),
            varkw: Some("unused_kwargs".into()),
            defaults: Vec::new(),
        };
        assert_eq!(spec.to_string(), "(unused_arg, *unused_args, **unused_kwargs)");
    }
}
