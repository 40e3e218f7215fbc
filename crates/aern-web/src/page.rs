//! The single-page form UI: two tabs, inline results, inline errors.

use axum::response::{Html, IntoResponse};

/// GET /
///
/// Submission form with the two analysis modes. Results and errors render
/// inline below whichever form produced them.
pub async fn index() -> impl IntoResponse {
    let version = env!("CARGO_PKG_VERSION");

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AERN | AI Emergency Response Navigator</title>
    <style>
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            line-height: 1.6;
            max-width: 760px;
            margin: 0 auto;
            padding: 20px;
        }}
        header {{ margin-bottom: 24px; }}
        h1 {{ color: #ff5f52; font-size: 28px; }}
        .caption {{ color: #888; font-size: 15px; }}
        .version {{ float: right; color: #666; font-family: monospace; font-size: 13px; }}
        .tabs {{ display: flex; gap: 8px; margin-bottom: 16px; }}
        .tab {{
            padding: 8px 16px; background: #2a2a2a; border: 1px solid #3a3a3a;
            border-radius: 4px 4px 0 0; cursor: pointer; color: #aaa;
        }}
        .tab.active {{ background: #3a3a3a; color: #fff; }}
        .panel {{ display: none; background: #222; border: 1px solid #3a3a3a; border-radius: 4px; padding: 20px; }}
        .panel.active {{ display: block; }}
        h2 {{ color: #4a9eff; font-size: 18px; margin-bottom: 12px; }}
        label {{ display: block; margin: 12px 0 4px; color: #bbb; }}
        textarea, input[type=file] {{
            width: 100%; background: #1a1a1a; color: #e0e0e0;
            border: 1px solid #3a3a3a; border-radius: 4px; padding: 8px;
        }}
        textarea {{ min-height: 110px; resize: vertical; }}
        .radio-row {{ display: flex; gap: 16px; margin: 8px 0; }}
        button {{
            margin-top: 16px; padding: 10px 20px; background: #ff5f52; color: #fff;
            border: none; border-radius: 4px; font-weight: 600; cursor: pointer;
        }}
        button:disabled {{ background: #555; cursor: wait; }}
        .result {{ margin-top: 20px; }}
        .result h3 {{ color: #4a9eff; margin: 12px 0 4px; }}
        .summary {{ background: #10391c; border: 1px solid #1d6b35; border-radius: 4px; padding: 10px; }}
        .error {{ background: #3a1514; border: 1px solid #7a2a27; border-radius: 4px; padding: 10px; margin-top: 16px; }}
        .warning {{ background: #3a2f12; border: 1px solid #7a6327; border-radius: 4px; padding: 8px; margin-top: 8px; }}
        img.preview {{ max-width: 220px; margin-top: 8px; border-radius: 4px; }}
    </style>
</head>
<body>
    <header>
        <span class="version">v{version}</span>
        <h1>🚨 AERN</h1>
        <div class="caption">AI Emergency Response Navigator</div>
    </header>

    <div class="tabs">
        <div class="tab active" data-panel="single">Single Modality Analysis</div>
        <div class="tab" data-panel="fusion">Multi-Modality Fusion</div>
    </div>

    <div id="single" class="panel active">
        <h2>Single Input Analysis</h2>
        <div class="radio-row">
            <label><input type="radio" name="modality" value="text" checked> Text</label>
            <label><input type="radio" name="modality" value="audio"> Audio</label>
            <label><input type="radio" name="modality" value="photo"> Photo</label>
        </div>
        <div data-input="text">
            <label>Describe the emergency situation:</label>
            <textarea id="single-text"></textarea>
        </div>
        <div data-input="audio" hidden>
            <label>Upload Audio Recording</label>
            <input type="file" id="single-audio" accept=".mp3,.wav,.m4a">
        </div>
        <div data-input="photo" hidden>
            <label>Upload Scene Photo</label>
            <input type="file" id="single-photo" accept=".jpg,.jpeg,.png">
        </div>
        <button id="single-submit">Analyze Single Input</button>
        <div id="single-out"></div>
    </div>

    <div id="fusion" class="panel">
        <h2>Multi-Modality Fusion</h2>
        <label>Text Input</label>
        <textarea id="fusion-text"></textarea>
        <label>Audio Input</label>
        <input type="file" id="fusion-audio" accept=".mp3,.wav,.m4a">
        <label>Photo Input</label>
        <input type="file" id="fusion-photo" accept=".jpg,.jpeg,.png">
        <img id="fusion-preview" class="preview" hidden>
        <button id="fusion-submit">Analyze Combined Data</button>
        <div id="fusion-out"></div>
    </div>

    <script>
        document.querySelectorAll('.tab').forEach(tab => {{
            tab.addEventListener('click', () => {{
                document.querySelectorAll('.tab').forEach(t => t.classList.remove('active'));
                document.querySelectorAll('.panel').forEach(p => p.classList.remove('active'));
                tab.classList.add('active');
                document.getElementById(tab.dataset.panel).classList.add('active');
            }});
        }});

        document.querySelectorAll('input[name=modality]').forEach(radio => {{
            radio.addEventListener('change', () => {{
                document.querySelectorAll('#single [data-input]').forEach(div => {{
                    div.hidden = div.dataset.input !== radio.value;
                }});
            }});
        }});

        document.getElementById('fusion-photo').addEventListener('change', e => {{
            const img = document.getElementById('fusion-preview');
            const file = e.target.files[0];
            img.hidden = !file;
            if (file) img.src = URL.createObjectURL(file);
        }});

        function render(out, data, headings) {{
            let html = '';
            for (const w of data.warnings || []) {{
                html += `<div class="warning">${{w}}</div>`;
            }}
            if (data.error) {{
                html += `<div class="error">${{data.error}}</div>`;
            }} else {{
                html += `<div class="result"><h3>📋 ${{headings[0]}}</h3><div>${{data.description}}</div>` +
                        `<h3>📢 ${{headings[1]}}</h3><div class="summary">${{data.summary}}</div></div>`;
            }}
            out.innerHTML = html;
        }}

        async function submitForm(url, body, button, out, headings) {{
            button.disabled = true;
            out.innerHTML = '';
            try {{
                const resp = await fetch(url, {{ method: 'POST', body }});
                render(out, await resp.json(), headings);
            }} catch (err) {{
                out.innerHTML = `<div class="error">An error occurred: ${{err}}</div>`;
            }} finally {{
                button.disabled = false;
            }}
        }}

        document.getElementById('single-submit').addEventListener('click', () => {{
            const modality = document.querySelector('input[name=modality]:checked').value;
            const body = new FormData();
            body.append('modality', modality);
            body.append('text', document.getElementById('single-text').value);
            const audio = document.getElementById('single-audio').files[0];
            const photo = document.getElementById('single-photo').files[0];
            if (audio) body.append('audio', audio);
            if (photo) body.append('photo', photo);
            submitForm('/api/analyze/single', body,
                document.getElementById('single-submit'),
                document.getElementById('single-out'),
                ['Situation Description', 'Action Summary']);
        }});

        document.getElementById('fusion-submit').addEventListener('click', () => {{
            const body = new FormData();
            body.append('text', document.getElementById('fusion-text').value);
            const audio = document.getElementById('fusion-audio').files[0];
            const photo = document.getElementById('fusion-photo').files[0];
            if (audio) body.append('audio', audio);
            if (photo) body.append('photo', photo);
            submitForm('/api/analyze/fusion', body,
                document.getElementById('fusion-submit'),
                document.getElementById('fusion-out'),
                ['Integrated Description', 'Strategic Summary']);
        }});
    </script>
</body>
</html>
"#
    );

    Html(html)
}
