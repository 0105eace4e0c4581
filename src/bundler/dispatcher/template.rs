//! Dispatcher program template.
//!
//! Two substitution points: `mapping` (a JSON object literal of platform key
//! to path segments) and `modules_directory` (a JavaScript expression for the
//! directory that holds the installed packages).

pub const DISPATCHER_TEMPLATE: &str = r#"#!/usr/bin/env node
'use strict';
const path = require('path');
const fs = require('fs');
const os = require('os');
const child_process = require('child_process');

const mapping = {{mapping}};
const modulesDirectory = {{modules_directory}};

const platformKey = process.platform + '_' + process.arch;
const definition = mapping[platformKey];
if (!definition) {
  console.error(
    'Unsupported platform: ' + platformKey + '. Supported platforms: ' + Object.keys(mapping).join(', ')
  );
  process.exit(1);
}

const packagePaths = [
  path.join(modulesDirectory, ...definition),
  path.join(__dirname, 'node_modules', ...definition),
];
const packagePath = packagePaths.find(p => fs.existsSync(p)) || packagePaths[0];

const child = child_process.spawn(packagePath, process.argv.slice(2), {
  stdio: 'inherit',
  env: process.env,
});
child.on('error', err => {
  console.error('Failed to launch ' + packagePath + ': ' + err.message);
  process.exit(1);
});
child.on('exit', (code, signal) => {
  if (signal) {
    // ignored signals (SIGPIPE) do not stop node, fall back to 128+n
    try {
      process.kill(process.pid, signal);
    } catch (err) {}
    process.exit(128 + (os.constants.signals[signal] || 0));
  }
  process.exit(code === null ? 1 : code);
});
"#;
