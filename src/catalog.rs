//! Static legal catalog: domains, wizard categories, and the per-domain
//! subcategory taxonomy.
//!
//! The wizard's category step and the classification prompt both draw from
//! `CATEGORIES`; the configuration step and the classification prompt draw
//! from the flattened subcategory list. All of it is compile-time data;
//! the curriculum changes rarely and ships with the binary.

use crate::domain::LegalDomain;

/// Domain row served by the catalog endpoint.
#[derive(Clone, Copy, Debug)]
pub struct DomainInfo {
  pub id: LegalDomain,
  pub name: &'static str,
  pub icon: &'static str,
}

/// Wizard category: a coarse theme the author can tick in step 2.
#[derive(Clone, Copy, Debug)]
pub struct CategoryDef {
  pub id: &'static str,
  pub name: &'static str,
  pub domain: LegalDomain,
}

/// A named group of fine-grained subcategories within one domain.
/// Flattened to `"{group} ({entry})"` strings for dropdowns and prompts.
#[derive(Clone, Copy, Debug)]
pub struct SubcategoryGroup {
  pub domain: LegalDomain,
  pub name: &'static str,
  pub entries: &'static [&'static str],
}

pub const DOMAINS: &[DomainInfo] = &[
  DomainInfo { id: LegalDomain::Civil, name: "Drept Civil", icon: "⚖️" },
  DomainInfo { id: LegalDomain::Penal, name: "Drept Penal", icon: "🔴" },
  DomainInfo { id: LegalDomain::Constitutional, name: "Drept Constituțional", icon: "📜" },
];

macro_rules! cat {
  ($id:expr, $name:expr, $domain:expr) => {
    CategoryDef { id: $id, name: $name, domain: $domain }
  };
}

macro_rules! group {
  ($domain:expr, $name:expr, $entries:expr) => {
    SubcategoryGroup { domain: $domain, name: $name, entries: $entries }
  };
}

use LegalDomain::{Civil, Constitutional, Penal};

pub const CATEGORIES: &[CategoryDef] = &[
  // Civil
  cat!("civil_persons", "Persoane fizice și juridice (capacitate, domiciliu, personalitate juridică)", Civil),
  cat!("civil_contracts_general", "Contracte generale (formare, efecte, interpretare, nulitate)", Civil),
  cat!("civil_contracts_special", "Contracte speciale (vânzare, locațiune, mandat, întreprindere)", Civil),
  cat!("civil_property", "Bunuri și proprietate (clasificare, drepturi reale, posesia, publicitate)", Civil),
  cat!("civil_obligations", "Obligații (izvoare, executare, prescripție)", Civil),
  cat!("civil_liability", "Răspundere civilă delictuală (culpă, prejudiciu, raport cauzal)", Civil),
  cat!("civil_guarantees", "Garanții reale (ipotecă, gaj, privilegii)", Civil),
  cat!("civil_family", "Familie (căsătorie, divorț, filație)", Civil),
  cat!("civil_succession", "Succesiuni (moștenire legală/testamentară)", Civil),
  // Penal
  cat!("penal_general_theory", "Teoria generală (element material, vinovăție, tentativă)", Penal),
  cat!("penal_life_integrity", "Infracțiuni contra vieții și integrității (omor, vătămare)", Penal),
  cat!("penal_property", "Infracțiuni contra patrimoniului (furt, înșelăciune, tâlhărie)", Penal),
  cat!("penal_authority", "Infracțiuni contra autorității (ultraj, evadare)", Penal),
  cat!("penal_participation", "Participație penală (autor, complice, instigator)", Penal),
  cat!("penal_sanctions", "Sancțiuni penale (pedeapsă, măsuri de siguranță)", Penal),
  cat!("penal_justification", "Cauze de justificare și nepedepsire (legitimă apărare)", Penal),
  cat!("penal_corruption", "Infracțiuni de corupție (luare/dare mită)", Penal),
  cat!("penal_economic", "Infracțiuni economice (evaziune, spălare bani, abuz în serviciu)", Penal),
  cat!("penal_public_safety", "Infracțiuni contra siguranței publice (incendiu, explozie)", Penal),
  cat!("penal_concurrence", "Concurs de infracțiuni și recidivă", Penal),
  // Constitutional
  cat!("const_fundamental_rights", "Drepturi fundamentale (libertate, egalitate, proprietate)", Constitutional),
  cat!("const_public_authorities", "Organizarea autorităților publice (Parlament, Guvern)", Constitutional),
  cat!("const_control", "Controlul de constituționalitate (CCR, excepție)", Constitutional),
  cat!("const_sovereignty", "Suveranitatea și cetățenia", Constitutional),
  cat!("const_separation", "Separația puterilor în stat", Constitutional),
  cat!("const_revision", "Revizuirea Constituției (limite, procedură)", Constitutional),
  cat!("const_administration", "Administrația publică (principii, funcționar)", Constitutional),
  cat!("const_autonomy", "Autonomia locală și descentralizare", Constitutional),
  cat!("const_eu", "Integrarea europeană și drept UE", Constitutional),
];

// Subcategory taxonomy following the Romanian civil/penal/constitutional
// codes. Entry strings are data, not identifiers: they end up verbatim in
// dropdowns, classification prompts, and the persisted subcategory column.

const CIVIL_GROUPS: &[SubcategoryGroup] = &[
  group!(Civil, "Persoane fizice", &[
    "Capacitatea de folosință",
    "Capacitatea de exercițiu",
    "Incapacități și interdicții",
    "Domiciliul și reședința",
    "Declararea morții și dispariția",
  ]),
  group!(Civil, "Persoane juridice", &[
    "Asociații și fundații",
    "Fuziune și divizare",
    "Dizolvare și lichidare",
    "Organe de conducere",
    "Patrimoniul persoanei juridice",
  ]),
  group!(Civil, "Bunuri - Clasificare și regim juridic", &[
    "Bunuri imobile și mobile",
    "Bunuri în circuitul civil",
    "Fructe naturale și civile",
    "Bunuri fungibile și nefungibile",
    "Patrimoniul privat și public",
  ]),
  group!(Civil, "Dreptul de proprietate", &[
    "Atributele dreptului de proprietate",
    "Coproprietate și proprietate comună",
    "Limitări legale ale proprietății",
    "Acțiuni în apărarea proprietății",
    "Proprietatea publică și privată",
  ]),
  group!(Civil, "Posesia", &[
    "Posesia de bună-credință",
    "Posesia de rea-credință",
    "Viciile posesiei",
    "Acțiuni posesorii",
    "Efectele posesiei",
  ]),
  group!(Civil, "Uzufruct, uz și abitație", &[
    "Uzufruct legal și convențional",
    "Drepturile uzufructuarului",
    "Obligațiile uzufructuarului",
    "Stingerea uzufructului",
    "Dreptul de uz și abitație",
  ]),
  group!(Civil, "Servituți", &[
    "Servituți de trecere",
    "Servituți de apă",
    "Servituți de prospect și lumină",
    "Servituți convenționale",
    "Stingerea servituților",
  ]),
  group!(Civil, "Dreptul de superficie", &[
    "Constituirea superficiei",
    "Drepturile superficiarului",
    "Transmiterea superficiei",
    "Stingerea dreptului de superficie",
    "Efectele stingerii",
  ]),
  group!(Civil, "Prescripția achizitivă", &[
    "Prescripția de 10 ani (bună-credință)",
    "Prescripția de 30 ani (rea-credință)",
    "Întreruperea prescripției",
    "Suspendarea prescripției",
    "Efectele prescripției achizitive",
  ]),
  group!(Civil, "Publicitatea imobiliară", &[
    "Înscrierea în cartea funciară",
    "Efectele înscrierii",
    "Intabularea și notarea provizorie",
    "Radierea înscrierii",
    "Erori în cartea funciară",
  ]),
  group!(Civil, "Formarea contractului", &[
    "Oferta și acceptarea",
    "Negocierea contractului",
    "Responsabilitatea precontractuală",
    "Promisiunea de contract",
    "Contractul prin corespodență",
  ]),
  group!(Civil, "Condițiile de validitate ale contractului", &[
    "Consimțământul liber și neviciat",
    "Viciile de consimțământ (eroare, dol, violență)",
    "Capacitatea de a contracta",
    "Obiectul și cauza contractului",
    "Forma contractului",
  ]),
  group!(Civil, "Efectele contractului", &[
    "Forța obligatorie a contractului",
    "Buna-credință contractuală",
    "Efecte față de terți",
    "Simulația",
    "Interpretarea contractului",
  ]),
  group!(Civil, "Neexecutarea contractului", &[
    "Executarea în natură",
    "Rezoluțiunea pentru neexecutare",
    "Excepția de neexecutare",
    "Daune-interese compensatorii",
    "Clauza penală",
  ]),
  group!(Civil, "Nulitatea contractului", &[
    "Nulitatea absolută",
    "Nulitatea relativă",
    "Acțiunea în anulare",
    "Confirmarea actului anulabil",
    "Efectele nulității",
  ]),
  group!(Civil, "Contractul de vânzare-cumpărare", &[
    "Obligațiile vânzătorului",
    "Obligațiile cumpărătorului",
    "Garanția pentru evicțiune",
    "Garanția pentru vicii ascunse",
    "Vânzări speciale (pe credit, cu rezerva proprietății)",
  ]),
  group!(Civil, "Contractul de locațiune", &[
    "Obligațiile locatorului",
    "Obligațiile locatarului",
    "Subînchirierea",
    "Încetarea locațiunii",
    "Locațiunea de bunuri imobile",
  ]),
  group!(Civil, "Contractul de mandat", &[
    "Mandatul cu/fără reprezentare",
    "Obligațiile mandatarului",
    "Obligațiile mandantului",
    "Încetarea mandatului",
    "Mandatul aparent",
  ]),
  group!(Civil, "Contractul de antrepriză și prestări servicii", &[
    "Obligațiile antreprenorului",
    "Obligațiile beneficiarului",
    "Răspunderea pentru vicii",
    "Receptia lucrărilor",
    "Rezilierea contractului",
  ]),
  group!(Civil, "Alte contracte speciale", &[
    "Contractul de donație",
    "Contractul de comodat",
    "Contractul de împrumut",
    "Contractul de depozit",
    "Contractul de tranzacție",
  ]),
  group!(Civil, "Izvoarele obligațiilor", &[
    "Obligațiile din contract",
    "Obligațiile din fapt juridic",
    "Gestiunea de afaceri",
    "Plata nedatorată",
    "Îmbogățirea fără justă cauză",
  ]),
  group!(Civil, "Executarea și transmiterea obligațiilor", &[
    "Executarea obligațiilor",
    "Daținrea în plată",
    "Novația",
    "Compensația",
    "Cesiunea de creanță",
  ]),
  group!(Civil, "Stingerea obligațiilor", &[
    "Plata",
    "Confuziunea",
    "Remiterea de datorie",
    "Imposibilitatea fortuită",
    "Prescripția extinctivă",
  ]),
  group!(Civil, "Prescripția extinctivă", &[
    "Termenul prescripției extinctive",
    "Întreruperea prescripției",
    "Suspendarea prescripției",
    "Efectele prescripției",
    "Renunțarea la prescripție",
  ]),
  group!(Civil, "Răspunderea civilă delictuală", &[
    "Condițiile răspunderii civile",
    "Culpa și gradul de culpă",
    "Prejudiciul material și moral",
    "Raportul de cauzalitate",
    "Cauze exoneratoare",
  ]),
  group!(Civil, "Răspunderi speciale și obiective", &[
    "Răspunderea comitentului",
    "Răspunderea părinților",
    "Răspunderea pentru animale",
    "Răspunderea pentru bunuri",
    "Răspunderea pentru produse defecte",
  ]),
  group!(Civil, "Ipoteca", &[
    "Ipoteca legală, judiciară, convențională",
    "Înscrierea ipotecii",
    "Rangul ipotecii",
    "Executarea ipotecii",
    "Stingerea ipotecii",
  ]),
  group!(Civil, "Gajul și privilegiile", &[
    "Gajul cu deposedare",
    "Gajul fără deposedare",
    "Privilegiile generale",
    "Privilegiile speciale",
    "Rangul privilegiilor",
  ]),
  group!(Civil, "Garanțiile personale", &[
    "Fidejusiunea",
    "Obligațiile fidejusorului",
    "Beneficiul de discuțiune",
    "Beneficiul de diviziune",
    "Stingerea fidejusiunii",
  ]),
  group!(Civil, "Succesiunile legale", &[
    "Clasele de moștenitori",
    "Reprezentarea succesorală",
    "Cote succesorale",
    "Dreptul de abitație al soțului supraviețuitor",
    "Nevrednicul și exclus din succesiune",
  ]),
  group!(Civil, "Succesiunile testamentare", &[
    "Testamentul olograf",
    "Testamentul autentic",
    "Capacitatea de a testa",
    "Legatul universal și cu titlu universal",
    "Rezerva succesorală și cotitatea disponibilă",
  ]),
  group!(Civil, "Partajul succesoral", &[
    "Masa succesorală",
    "Raportul donațiilor și legatelor",
    "Reducțiunea liberalităților excesive",
    "Partajul bunurilor",
    "Efectele partajului",
  ]),
  group!(Civil, "Căsătoria", &[
    "Condițiile de fond și formă",
    "Efectele căsătoriei",
    "Regimul legal (comunitate)",
    "Regimul separației de bunuri",
    "Nulitatea căsătoriei",
  ]),
  group!(Civil, "Divorțul", &[
    "Divorțul prin consimțământul soților",
    "Divorțul pentru culpă",
    "Divorțul pentru destrămarea căsătoriei",
    "Efectele divorțului",
    "Partajul bunurilor la desfacerea căsătoriei",
  ]),
  group!(Civil, "Filiația și autoritatea părintească", &[
    "Filiația din căsătorie",
    "Filiația din afara căsătoriei",
    "Adopția",
    "Autoritatea părintească",
    "Obligația de întreținere",
  ]),
];

const PENAL_GROUPS: &[SubcategoryGroup] = &[
  group!(Penal, "Infracțiuni contra persoanei", &[
    "Infracțiuni contra vieții",
    "Infracțiuni contra integrității corporale sau sănătății",
    "Infracțiuni săvârșite asupra unui membru de familie",
    "Agresiuni asupra fătului",
    "Infracțiuni privind obligația de asistență a celor în primejdie",
    "Infracțiuni contra libertății persoanei",
    "Traficul și exploatarea persoanelor vulnerabile",
    "Infracțiuni contra libertății și integrității sexuale",
    "Infracțiuni ce aduc atingere domiciliului și vieții private",
  ]),
  group!(Penal, "Infracțiuni contra patrimoniului", &[
    "Furtul",
    "Tâlhăria și pirateria",
    "Infracțiuni contra patrimoniului prin nesocotirea încrederii",
    "Fraude comise prin sisteme informatice și mijloace de plată electronice",
    "Distrugerea și tulburarea de posesie",
  ]),
  group!(Penal, "Infracțiuni privind autoritatea și frontiera de stat", &[
    "Infracțiuni contra autorității",
    "Infracțiuni privind frontiera de stat",
  ]),
  group!(Penal, "Infracțiuni contra înfăptuirii justiției", &[
    "Mărturie mincinoasă",
    "Favorizarea infractorului",
    "Sustragerea de la urmărire sau judecată",
    "Îngrădirea exercitării drepturilor",
    "Ultraj și alte infracțiuni",
  ]),
  group!(Penal, "Infracțiuni de corupție și de serviciu", &[
    "Infracțiuni de corupție",
    "Infracțiuni de serviciu",
  ]),
  group!(Penal, "Infracțiuni de fals", &[
    "Falsificarea de monede, timbre sau de alte valori",
    "Falsificarea instrumentelor de autentificare sau de marcare",
    "Falsuri în înscrisuri",
  ]),
  group!(Penal, "Infracțiuni contra siguranței publice", &[
    "Infracțiuni contra siguranței circulației pe căile ferate",
    "Infracțiuni contra siguranței circulației pe drumurile publice",
    "Nerespectarea regimului armelor, munițiilor, materialelor nucleare și al materiilor explozive",
    "Infracțiuni privitoare la regimul stabilit pentru alte activități reglementate de lege",
    "Infracțiuni contra sănătății publice",
    "Infracțiuni contra siguranței și integrității sistemelor și datelor informatice",
  ]),
  group!(Penal, "Infracțiuni contra convietuirii sociale", &[
    "Infracțiuni contra ordinii și liniștii publice",
    "Infracțiuni contra familiei",
    "Infracțiuni contra libertății religioase și respectului datorat persoanelor decedate",
  ]),
  group!(Penal, "Infracțiuni electorale", &[
    "Coruperea alegătorilor",
    "Fraudarea alegerilor",
    "Împiedicarea exercitării drepturilor electorale",
    "Alte infracțiuni electorale",
  ]),
  group!(Penal, "Infracțiuni contra securității naționale", &[
    "Trădarea",
    "Spionajul",
    "Sabotajul",
    "Diversiunea",
    "Asocierea în vederea săvârșirii de infracțiuni contra securității naționale",
  ]),
  group!(Penal, "Infracțiuni contra capacității de luptă a forțelor armate", &[
    "Infracțiuni săvârșite de militari",
    "Infracțiuni săvârșite de militari sau de civili",
  ]),
  group!(Penal, "Infracțiuni de genocid, contra umanității și de război", &[
    "Infracțiuni de genocid și contra umanității",
    "Infracțiuni de război",
  ]),
  group!(Penal, "Teoria generală a infracțiunii", &[
    "Trăsăturile esențiale ale infracțiunii",
    "Vinovăția (intenție și culpă)",
    "Cauzele justificative",
    "Cauzele de neimputabilitate",
    "Tentativa",
    "Unitatea și pluralitatea de infracțiuni",
    "Autorul și participanții",
  ]),
  group!(Penal, "Pedepse și sancțiuni penale", &[
    "Categoriile pedepselor",
    "Pedepsele principale",
    "Pedeapsa accesorie și pedepsele complementare",
    "Individualizarea pedepselor",
    "Circumstanțe atenuante și agravante",
    "Renunțarea la aplicarea pedepsei",
    "Amânarea aplicării pedepsei",
    "Suspendarea executării pedepsei sub supraveghere",
    "Liberarea condiționată",
    "Măsurile de siguranță",
  ]),
  group!(Penal, "Răspunderea penală a persoanei juridice", &[
    "Dispoziții generale",
    "Regimul pedepselor complementare aplicate persoanei juridice",
    "Dispoziții comune",
  ]),
  group!(Penal, "Cauze care înlătură răspunderea penală", &[
    "Amnistia",
    "Prescripția răspunderii penale",
    "Lipsa plângerii prealabile",
    "Retragerea plângerii prealabile",
    "Împăcarea",
  ]),
  group!(Penal, "Aplicarea legii penale", &[
    "Principii generale (legalitate)",
    "Aplicarea legii penale în timp",
    "Aplicarea legii penale în spațiu",
    "Legea penală și tratatele internaționale",
    "Extrădarea",
  ]),
];

const CONSTITUTIONAL_GROUPS: &[SubcategoryGroup] = &[
  group!(Constitutional, "Drepturi fundamentale", &[
    "Dreptul la viață și integritate fizică",
    "Libertatea de exprimare și opinie",
    "Dreptul de proprietate privată",
    "Egalitatea în fața legii",
    "Libertatea de asociere și adunare",
    "Libertatea de mișcare și domiciliu",
  ]),
  group!(Constitutional, "Organizarea autorităților publice", &[
    "Parlamentul (structură și atribuții)",
    "Guvernul (formare și funcționare)",
    "Președintele României",
    "Puterea judecătorească",
    "Autorități administrative autonome",
  ]),
  group!(Constitutional, "Controlul de constituționalitate", &[
    "Curtea Constituțională (organizare)",
    "Controlul a priori",
    "Controlul a posteriori (excepția de neconstituționalitate)",
    "Efectele deciziilor CCR",
  ]),
  group!(Constitutional, "Suveranitatea și cetățenia", &[
    "Suveranitatea națională",
    "Cetățenia română (dobândire și pierdere)",
    "Poporul și referendum",
    "Principii constituționale fundamentale",
  ]),
  group!(Constitutional, "Separația puterilor în stat", &[
    "Separația legislativă-executivă",
    "Separația executivă-judecătorească",
    "Separația legislativă-judecătorească",
    "Echilibrul constituțional",
    "Incompatibilități",
  ]),
  group!(Constitutional, "Revizuirea Constituției", &[
    "Inițiativa revizuirii",
    "Procedura de adoptare",
    "Limitele revizuirii",
    "Forme de guvernământ interzise",
  ]),
  group!(Constitutional, "Administrația publică", &[
    "Principii de organizare",
    "Statutul funcționarului public",
    "Răspunderea administrativă",
    "Autoritatea tutelară",
  ]),
  group!(Constitutional, "Autonomia locală și descentralizare", &[
    "Autoritățile administrației publice locale",
    "Consiliul local și primarul",
    "Consiliul județean și președintele",
    "Descentralizarea serviciilor publice",
  ]),
  group!(Constitutional, "Integrarea europeană și drept UE", &[
    "Transferul de suveranitate",
    "Primatul dreptului UE",
    "Directivele și regulamentele UE",
    "Cetățenia europeană",
  ]),
];

/// All wizard categories belonging to one domain, in catalog order.
pub fn categories_for(domain: LegalDomain) -> Vec<&'static CategoryDef> {
  CATEGORIES.iter().filter(|c| c.domain == domain).collect()
}

/// Display name for a category id, if the id exists in the catalog.
pub fn category_name(id: &str) -> Option<&'static str> {
  CATEGORIES.iter().find(|c| c.id == id).map(|c| c.name)
}

/// True if `id` names a catalog category within `domain`.
pub fn is_known_category(id: &str, domain: LegalDomain) -> bool {
  CATEGORIES.iter().any(|c| c.id == id && c.domain == domain)
}

fn groups_for(domain: LegalDomain) -> &'static [SubcategoryGroup] {
  match domain {
    LegalDomain::Civil => CIVIL_GROUPS,
    LegalDomain::Penal => PENAL_GROUPS,
    LegalDomain::Constitutional => CONSTITUTIONAL_GROUPS,
  }
}

/// Flattened subcategory options for a domain: `"{group} ({entry})"` rows
/// in taxonomy order, with a catch-all "Altele" at the end.
pub fn subcategory_options(domain: LegalDomain) -> Vec<String> {
  let mut out = Vec::new();
  for g in groups_for(domain) {
    for entry in g.entries {
      out.push(format!("{} ({})", g.name, entry));
    }
  }
  out.push("Altele".to_string());
  out
}
