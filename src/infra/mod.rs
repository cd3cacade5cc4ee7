// ABOUTME: Synthesizes missing deployment infrastructure as in-memory artifacts.
// ABOUTME: Generates only what the project lacks; marker files are always produced.

use crate::project::{Classification, Language};
use crate::types::RepoName;

/// Remote path of the synthesized container descriptor.
pub const CONTAINER_PATH: &str = "Dockerfile";

/// Remote path of the synthesized CI pipeline.
pub const PIPELINE_PATH: &str = ".github/workflows/ci_cd.yml";

/// Remote path of the no-jekyll marker.
pub const NOJEKYLL_PATH: &str = ".nojekyll";

/// Remote path of the custom-domain marker.
pub const DOMAIN_MARKER_PATH: &str = "CNAME";

/// Remote path of the bundler base-path override.
pub const BUNDLER_CONFIG_PATH: &str = "vite.config.js";

const CONTAINER_DESCRIPTOR: &str = r#"FROM node:18-alpine
WORKDIR /app
COPY package*.json ./
RUN npm install
COPY . .
EXPOSE 3000
CMD ["npm", "start"]"#;

const STATIC_PIPELINE: &str = r#"name: Deploy Static Content
on:
  push:
    branches: ["main"]
  workflow_dispatch:
permissions:
  contents: read
  pages: write
  id-token: write
concurrency:
  group: "pages"
  cancel-in-progress: false
jobs:
  deploy:
    environment:
      name: github-pages
      url: ${{ steps.deployment.outputs.page_url }}
    runs-on: ubuntu-latest
    steps:
      - name: Checkout
        uses: actions/checkout@v4
      - name: Setup Pages
        uses: actions/configure-pages@v5
      - name: Upload artifact
        uses: actions/upload-pages-artifact@v3
        with:
          path: '.'
      - name: Deploy to GitHub Pages
        id: deployment
        uses: actions/deploy-pages@v4
"#;

/// A synthesized file, in memory, destined for upload or inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfraArtifact {
    pub path: String,
    pub content: String,
}

impl InfraArtifact {
    fn new(path: &str, content: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            content: content.into(),
        }
    }
}

/// Everything the synthesizer produced for one attempt.
///
/// Markers are always written and go first in the upload sequence. The
/// pipeline exists only when the project has none of its own and goes last.
/// The container descriptor is generated for Node projects without one; it
/// is carried for inspection and is not part of the hosting upload sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfraPlan {
    pub container: Option<InfraArtifact>,
    pub markers: Vec<InfraArtifact>,
    pub pipeline: Option<InfraArtifact>,
}

/// Apply the synthesis rule table to a classification.
pub fn synthesize(
    classification: &Classification,
    repo: &RepoName,
    custom_domain: Option<&str>,
) -> InfraPlan {
    let container = (classification.language == Language::Node
        && !classification.has_container_file)
        .then(|| InfraArtifact::new(CONTAINER_PATH, CONTAINER_DESCRIPTOR));

    let mut markers = vec![InfraArtifact::new(NOJEKYLL_PATH, "")];
    if let Some(domain) = custom_domain.map(str::trim).filter(|d| !d.is_empty()) {
        markers.push(InfraArtifact::new(DOMAIN_MARKER_PATH, domain));
    }
    if classification.is_bundler_framework {
        markers.push(InfraArtifact::new(
            BUNDLER_CONFIG_PATH,
            bundler_config(repo),
        ));
    }

    let pipeline = (!classification.has_pipeline).then(|| match classification.language {
        Language::Node => InfraArtifact::new(
            PIPELINE_PATH,
            node_pipeline(&build_command(classification, repo)),
        ),
        _ => InfraArtifact::new(PIPELINE_PATH, STATIC_PIPELINE),
    });

    InfraPlan {
        container,
        markers,
        pipeline,
    }
}

/// Build command for the Node pipeline. Bundler projects get an explicit
/// base-path override so assets resolve under `/<repo>/` on project pages.
fn build_command(classification: &Classification, repo: &RepoName) -> String {
    if classification.is_bundler_framework {
        format!("npm install && npx vite build --base /{repo}/")
    } else {
        "npm install && npm run build".to_string()
    }
}

fn node_pipeline(build_command: &str) -> String {
    format!(
        r#"name: Deploy to GitHub Pages
on:
  push:
    branches: ["main"]
  workflow_dispatch:
permissions:
  contents: read
  pages: write
  id-token: write
concurrency:
  group: "pages"
  cancel-in-progress: false
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - name: Checkout
        uses: actions/checkout@v4
      - name: Setup Node
        uses: actions/setup-node@v4
        with:
          node-version: "20"
      - name: Install and Build
        run: {build_command}
      - name: Setup Pages
        uses: actions/configure-pages@v5
      - name: Upload artifact
        uses: actions/upload-pages-artifact@v3
        with:
          path: './dist'
  deploy:
    environment:
      name: github-pages
      url: ${{{{ steps.deployment.outputs.page_url }}}}
    runs-on: ubuntu-latest
    needs: build
    steps:
      - name: Deploy to GitHub Pages
        id: deployment
        uses: actions/deploy-pages@v4
"#
    )
}

fn bundler_config(repo: &RepoName) -> String {
    format!(
        r#"import {{ defineConfig }} from 'vite'
import react from '@vitejs/plugin-react'
export default defineConfig({{
  base: '/{repo}/',
  plugins: [react()],
}})"#
    )
}
