//! Fixed-content configuration files for the NativeWind integration
//!
//! Pure functions from the structural placement to literal file contents.
//! There is no templating: nothing varies beyond which welcome variant is
//! written and where.

use std::path::{Path, PathBuf};

/// Where the welcome screen lands in the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomePlacement {
    /// File-system router with a nested tab group: `app/(tabs)/index.tsx`
    RouterTabs,
    /// File-system router: `app/index.tsx`
    Router,
    /// Traditional entry point: `App.tsx`
    Classic,
}

/// Detect placement from the generated project's folder structure
pub fn detect_placement(project_path: &Path) -> WelcomePlacement {
    let app_dir = project_path.join("app");
    if app_dir.is_dir() {
        if app_dir.join("(tabs)").is_dir() {
            WelcomePlacement::RouterTabs
        } else {
            WelcomePlacement::Router
        }
    } else {
        WelcomePlacement::Classic
    }
}

/// Path the welcome screen is written to
pub fn welcome_path(project_path: &Path, placement: WelcomePlacement) -> PathBuf {
    match placement {
        WelcomePlacement::RouterTabs => project_path.join("app").join("(tabs)").join("index.tsx"),
        WelcomePlacement::Router => project_path.join("app").join("index.tsx"),
        WelcomePlacement::Classic => project_path.join("App.tsx"),
    }
}

pub fn tailwind_config() -> &'static str {
    r#"/** @type {import('tailwindcss').Config} */
module.exports = {
  content: [
    "./App.{js,jsx,ts,tsx}",
    "./app/**/*.{js,jsx,ts,tsx}",
    "./components/**/*.{js,jsx,ts,tsx}",
    "./screens/**/*.{js,jsx,ts,tsx}",
    "./(tabs)/**/*.{js,jsx,ts,tsx}",
  ],
  presets: [require("nativewind/preset")],
  theme: {
    extend: {},
  },
  plugins: [],
};
"#
}

pub fn babel_config() -> &'static str {
    r#"module.exports = function (api) {
  api.cache(true);
  return {
    presets: [
      ["babel-preset-expo", { jsxImportSource: "nativewind" }],
      "nativewind/babel",
    ],
  };
};
"#
}

pub fn global_css() -> &'static str {
    "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n"
}

pub fn metro_config() -> &'static str {
    r#"const { getDefaultConfig } = require("expo/metro-config");
const { withNativeWind } = require('nativewind/metro');

const config = getDefaultConfig(__dirname);

module.exports = withNativeWind(config, { input: './app/global.css' });
"#
}

pub fn nativewind_types() -> &'static str {
    "/// <reference types=\"nativewind/types\" />\n"
}

/// Welcome screen source. The stylesheet import is relative to the
/// placement; the classic variant also wires up the status bar.
pub fn welcome_screen(placement: WelcomePlacement) -> String {
    match placement {
        WelcomePlacement::RouterTabs | WelcomePlacement::Router => {
            let import = match placement {
                WelcomePlacement::RouterTabs => "../global.css",
                _ => "./global.css",
            };
            format!(
                r#"import "{import}";
import {{ Text, View }} from "react-native";

export default function HomeScreen() {{
  return (
    <View className="flex-1 items-center justify-center bg-white">
      <Text className="text-3xl font-bold text-purple-600">
        Welcome to Expo + NativeWind!
      </Text>
      <Text className="mt-4 text-lg text-gray-600">
        Start building your app with TailwindCSS
      </Text>
    </View>
  );
}}
"#
            )
        }
        WelcomePlacement::Classic => r#"import "./app/global.css";
import { StatusBar } from "expo-status-bar";
import { Text, View } from "react-native";

export default function App() {
  return (
    <View className="flex-1 items-center justify-center bg-white">
      <Text className="text-3xl font-bold text-purple-600">
        Welcome to Expo + NativeWind!
      </Text>
      <Text className="mt-4 text-lg text-gray-600">
        Start building your app with TailwindCSS
      </Text>
      <StatusBar style="auto" />
    </View>
  );
}
"#
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_detect_placement_classic() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("App.tsx"), "").unwrap();
        assert_eq!(detect_placement(tmp.path()), WelcomePlacement::Classic);
    }

    #[test]
    fn test_detect_placement_router() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("app")).unwrap();
        assert_eq!(detect_placement(tmp.path()), WelcomePlacement::Router);
    }

    #[test]
    fn test_detect_placement_router_tabs() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("app").join("(tabs)")).unwrap();
        assert_eq!(detect_placement(tmp.path()), WelcomePlacement::RouterTabs);
    }

    #[test]
    fn test_welcome_path_per_placement() {
        let root = Path::new("/p");
        assert_eq!(
            welcome_path(root, WelcomePlacement::RouterTabs),
            Path::new("/p/app/(tabs)/index.tsx")
        );
        assert_eq!(
            welcome_path(root, WelcomePlacement::Router),
            Path::new("/p/app/index.tsx")
        );
        assert_eq!(
            welcome_path(root, WelcomePlacement::Classic),
            Path::new("/p/App.tsx")
        );
    }

    #[test]
    fn test_welcome_import_path_follows_placement() {
        assert!(welcome_screen(WelcomePlacement::RouterTabs).contains("import \"../global.css\""));
        assert!(welcome_screen(WelcomePlacement::Router).contains("import \"./global.css\""));
        assert!(welcome_screen(WelcomePlacement::Classic).contains("import \"./app/global.css\""));
        assert!(welcome_screen(WelcomePlacement::Classic).contains("StatusBar"));
        assert!(!welcome_screen(WelcomePlacement::Router).contains("StatusBar"));
    }

    #[test]
    fn test_fixed_file_contents() {
        assert!(tailwind_config().contains("nativewind/preset"));
        assert!(tailwind_config().contains("./app/**/*.{js,jsx,ts,tsx}"));
        assert!(babel_config().contains("babel-preset-expo"));
        assert!(babel_config().contains("nativewind/babel"));
        assert!(global_css().contains("@tailwind base;"));
        assert!(global_css().contains("@tailwind components;"));
        assert!(global_css().contains("@tailwind utilities;"));
        assert!(metro_config().contains("withNativeWind"));
        assert!(metro_config().contains("./app/global.css"));
        assert!(nativewind_types().contains("nativewind/types"));
    }
}
