//! Package manager detection
//!
//! Resolution order: explicit flags, then the invoking package manager's
//! self-reported user agent, then the invoking executable heuristics, then
//! npm. Within each tier the substring checks are ordered so that bun and
//! pnpm are tested before npm and yarn - `npm` is a substring of neither, but
//! a bun user agent also advertises an `npm/?` compatibility marker, and a
//! path like `.../pnpm/bin` contains `npm`. The ordering is load-bearing.

use super::PackageManager;

/// Explicit per-manager override flags from the CLI
#[derive(Debug, Clone, Copy, Default)]
pub struct ManagerFlags {
    pub npm: bool,
    pub yarn: bool,
    pub pnpm: bool,
    pub bun: bool,
}

/// Ambient process environment consulted by detection
///
/// Captured into a plain struct so `detect` stays a pure function.
#[derive(Debug, Clone, Default)]
pub struct DetectEnv {
    /// `npm_config_user_agent` - set by npm, yarn, pnpm and bun
    pub user_agent: String,
    /// `$_` - path of the executable that invoked us (npx, bunx, ...)
    pub exec_path: String,
    /// The program path this process was invoked as
    pub invocation: String,
}

impl DetectEnv {
    /// Snapshot the real process environment
    pub fn from_process() -> Self {
        Self {
            user_agent: std::env::var("npm_config_user_agent").unwrap_or_default(),
            exec_path: std::env::var("_").unwrap_or_default(),
            invocation: std::env::args().next().unwrap_or_default(),
        }
    }
}

/// Resolve exactly one package manager. Always terminates with a value.
pub fn detect(flags: &ManagerFlags, env: &DetectEnv) -> PackageManager {
    // Explicit flags win over any inference
    if flags.npm {
        return PackageManager::Npm;
    }
    if flags.yarn {
        return PackageManager::Yarn;
    }
    if flags.pnpm {
        return PackageManager::Pnpm;
    }
    if flags.bun {
        return PackageManager::Bun;
    }

    // User agent: bun first, its string also carries an npm marker
    if env.user_agent.contains("bun") {
        return PackageManager::Bun;
    }
    if env.user_agent.contains("yarn") {
        return PackageManager::Yarn;
    }
    if env.user_agent.contains("pnpm") {
        return PackageManager::Pnpm;
    }
    if env.user_agent.contains("npm") {
        return PackageManager::Npm;
    }

    // Invoking executable (npx, bunx, pnpx, yarn dlx)
    if env.exec_path.contains("bun") || env.invocation.contains("bunx") {
        return PackageManager::Bun;
    }
    if env.exec_path.contains("pnpm") || env.invocation.contains("pnpx") {
        return PackageManager::Pnpm;
    }
    if env.exec_path.contains("yarn") {
        return PackageManager::Yarn;
    }

    PackageManager::Npm
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ua(user_agent: &str) -> DetectEnv {
        DetectEnv {
            user_agent: user_agent.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_explicit_flags() {
        let env = DetectEnv::default();
        let cases = [
            (
                ManagerFlags {
                    npm: true,
                    ..Default::default()
                },
                PackageManager::Npm,
            ),
            (
                ManagerFlags {
                    yarn: true,
                    ..Default::default()
                },
                PackageManager::Yarn,
            ),
            (
                ManagerFlags {
                    pnpm: true,
                    ..Default::default()
                },
                PackageManager::Pnpm,
            ),
            (
                ManagerFlags {
                    bun: true,
                    ..Default::default()
                },
                PackageManager::Bun,
            ),
        ];
        for (flags, expected) in cases {
            assert_eq!(detect(&flags, &env), expected);
        }
    }

    #[test]
    fn test_flag_beats_environment() {
        let flags = ManagerFlags {
            pnpm: true,
            ..Default::default()
        };
        assert_eq!(
            detect(&flags, &ua("yarn/1.22.19 npm/? node/v18.0.0")),
            PackageManager::Pnpm
        );
    }

    #[test]
    fn test_flag_priority_order_when_several_set() {
        // CLI constraints should prevent this; npm wins by fixed order anyway
        let flags = ManagerFlags {
            npm: true,
            yarn: true,
            pnpm: true,
            bun: true,
        };
        assert_eq!(detect(&flags, &DetectEnv::default()), PackageManager::Npm);
    }

    #[test]
    fn test_user_agent_detection() {
        assert_eq!(detect(&ManagerFlags::default(), &ua("bun/1.0.0")), PackageManager::Bun);
        assert_eq!(detect(&ManagerFlags::default(), &ua("yarn/1.22.0")), PackageManager::Yarn);
        assert_eq!(detect(&ManagerFlags::default(), &ua("pnpm/8.0.0")), PackageManager::Pnpm);
        assert_eq!(detect(&ManagerFlags::default(), &ua("npm/9.0.0")), PackageManager::Npm);
    }

    #[test]
    fn test_bun_wins_over_its_npm_compat_marker() {
        // bun reports e.g. "bun/1.0.0 npm/? node/v18.15.0" - the npm
        // substring must not shadow it
        assert_eq!(
            detect(&ManagerFlags::default(), &ua("bun/1.0.0 npm/? node/v18.15.0")),
            PackageManager::Bun
        );
    }

    #[test]
    fn test_yarn_wins_over_its_npm_compat_marker() {
        assert_eq!(
            detect(
                &ManagerFlags::default(),
                &ua("yarn/1.22.19 npm/? node/v18.0.0 darwin x64")
            ),
            PackageManager::Yarn
        );
    }

    #[test]
    fn test_exec_path_heuristics() {
        let flags = ManagerFlags::default();
        let env = DetectEnv {
            exec_path: "/usr/local/bin/bun".to_string(),
            ..Default::default()
        };
        assert_eq!(detect(&flags, &env), PackageManager::Bun);

        let env = DetectEnv {
            exec_path: "/home/u/.local/share/pnpm/pnpm".to_string(),
            ..Default::default()
        };
        assert_eq!(detect(&flags, &env), PackageManager::Pnpm);

        let env = DetectEnv {
            invocation: "/usr/lib/node_modules/bunx".to_string(),
            ..Default::default()
        };
        assert_eq!(detect(&flags, &env), PackageManager::Bun);

        let env = DetectEnv {
            invocation: "/usr/local/bin/pnpx".to_string(),
            ..Default::default()
        };
        assert_eq!(detect(&flags, &env), PackageManager::Pnpm);

        let env = DetectEnv {
            exec_path: "/opt/yarn/bin/yarn".to_string(),
            ..Default::default()
        };
        assert_eq!(detect(&flags, &env), PackageManager::Yarn);
    }

    #[test]
    fn test_user_agent_outranks_exec_path() {
        let env = DetectEnv {
            user_agent: "yarn/1.22.0".to_string(),
            exec_path: "/usr/local/bin/bun".to_string(),
            ..Default::default()
        };
        assert_eq!(detect(&ManagerFlags::default(), &env), PackageManager::Yarn);
    }

    #[test]
    fn test_default_is_npm() {
        assert_eq!(
            detect(&ManagerFlags::default(), &DetectEnv::default()),
            PackageManager::Npm
        );
    }

    #[test]
    fn test_detection_is_pure() {
        let flags = ManagerFlags::default();
        let env = ua("pnpm/8.0.0");
        let first = detect(&flags, &env);
        for _ in 0..10 {
            assert_eq!(detect(&flags, &env), first);
        }
    }
}
