/// Upload page served at `/`. Posts to the stitch endpoint and renders the
/// preview, progress lines, and download link from the JSON response.
pub const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Spreadsheet Stitcher</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
  button { padding: .5rem 1rem; border-radius: .4rem; border: 1px solid #c33; cursor: pointer; }
  button.primary { background: #e44; color: #fff; }
  button.secondary { background: #fff; color: #c33; }
  button:disabled { opacity: .5; cursor: not-allowed; }
  #messages { font-family: ui-monospace, monospace; white-space: pre-wrap; }
  .error { color: #b00; }
  table { border-collapse: collapse; margin-top: 1rem; font-size: .9rem; }
  th, td { border: 1px solid #ddd; padding: .25rem .5rem; text-align: left; }
</style>
</head>
<body>
<h1>Spreadsheet Stitcher</h1>
<p>Select CSV, XLS, or XLSX files. Columns with the same name are lined up; others are kept side by side.</p>
<form id="stitch-form">
  <p><input id="files" type="file" name="files" multiple accept=".csv,.xls,.xlsx"></p>
  <p><label><input id="deduplicate" type="checkbox" name="deduplicate" value="true"> Deduplicate?</label></p>
  <p><button id="stitch" class="primary" type="submit" disabled>Stitch Spreadsheets</button></p>
</form>
<div id="messages"></div>
<p id="download" hidden><a id="download-link" href="#">Download stitched_data.csv</a></p>
<div id="preview"></div>
<script>
const form = document.getElementById("stitch-form");
const files = document.getElementById("files");
const button = document.getElementById("stitch");
const messages = document.getElementById("messages");
const download = document.getElementById("download");
const downloadLink = document.getElementById("download-link");
const preview = document.getElementById("preview");

function setButtonState(state) {
  button.className = state;
}

function reset() {
  messages.textContent = "";
  messages.className = "";
  download.hidden = true;
  preview.replaceChildren();
  setButtonState("primary");
}

function renderTable(table) {
  const element = document.createElement("table");
  const head = element.createTHead().insertRow();
  head.appendChild(document.createElement("th"));
  for (const header of table.headers) {
    const th = document.createElement("th");
    th.textContent = header;
    head.appendChild(th);
  }
  const body = element.createTBody();
  for (const row of table.rows) {
    const tr = body.insertRow();
    tr.insertCell().textContent = row.index;
    for (const cell of row.cells) {
      tr.insertCell().textContent = cell;
    }
  }
  preview.replaceChildren(element);
  if (table.truncated) {
    const note = document.createElement("p");
    note.textContent = `${table.rows.length} of ${table.total_rows} rows shown`;
    preview.appendChild(note);
  }
}

files.addEventListener("change", () => {
  reset();
  button.disabled = files.files.length === 0;
});

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  reset();
  button.disabled = true;
  messages.textContent = "Loading spreadsheets ...";
  const body = new FormData();
  for (const file of files.files) {
    body.append("files", file, file.name);
  }
  body.append("deduplicate", document.getElementById("deduplicate").checked ? "true" : "false");
  try {
    const response = await fetch("/api/v1/stitch", { method: "POST", body });
    const payload = await response.json();
    if (!response.ok) {
      messages.className = "error";
      messages.textContent = payload.message;
      return;
    }
    messages.textContent = payload.messages.join("\n");
    setButtonState(payload.button_state);
    downloadLink.href = payload.download_url;
    downloadLink.download = payload.file_name;
    download.hidden = false;
    renderTable(payload.table);
  } catch (error) {
    messages.className = "error";
    messages.textContent = String(error);
  } finally {
    button.disabled = files.files.length === 0;
  }
});
</script>
</body>
</html>
"##;
